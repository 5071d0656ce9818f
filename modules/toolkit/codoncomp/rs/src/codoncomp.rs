use eyre::{Result, WrapErr};
use log::{info, warn};
use rand::Rng;

use framekit_core_rs::anchor::{RecordSource, Resolver, Selector};
use framekit_core_rs::loc::{Contig, Feature};
use framekit_core_rs::num::Pos;
use framekit_core_rs::seq::SequenceStore;

use crate::config::Config;
use crate::counter::CountTable;
use crate::resample::{Resampler, Window};
use crate::result::{Composition, ResamplingReport};

/// Codon (or nucleotide) composition of the reference around read anchors.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodonComp {
    config: Config,
    resampler: Resampler,
}

impl CodonComp {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let window = Window::new(*config.win_up(), *config.win_down())?;
        let resampler = Resampler::new(window, *config.max_misses())?;
        Ok(Self { config, resampler })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tabulates the composition around anchors of all features. With `random` enabled, anchors
    /// of each feature are first relocated by the composition-preserving resampler.
    pub fn run<'a, Ctg: Contig + 'a>(
        &self,
        store: &SequenceStore<Ctg>,
        features: impl IntoIterator<Item = &'a Feature<Ctg>>,
        source: &mut impl RecordSource<Ctg>,
        rng: &mut impl Rng,
    ) -> Result<Composition> {
        let config = &self.config;
        let mut table = CountTable::new(*config.span_up(), *config.span_down(), *config.unit())?;
        let mut selector = Selector::new(
            Resolver::new(*config.endpoint(), *config.collapse()),
            *config.q_area(),
            *config.anti(),
            *config.len_lim(),
        )?;
        let mut resampling = ResamplingReport::default();

        for feature in features {
            // Content windows of resampled anchors must stay on the sequence
            let length = store.get(feature.contig()).map_or(0, |x| x.len() as Pos);
            let accept = |pos| config.admits(pos, feature.interval(), length);
            let selection = match selector.select(feature, store, source, accept)? {
                Some(selection) => selection,
                None => continue,
            };
            let (sequence, mut wig) = selection.dissolve();

            if *config.random() && !wig.is_empty() {
                let resampled = self
                    .resampler
                    .resample(&wig, sequence, feature.interval(), accept, rng)
                    .wrap_err_with(|| format!("Failed to resample {}", feature.describe()))?;
                for (frame, outcome) in resampled.outcomes() {
                    if !outcome.is_satisfied() {
                        warn!(
                            "{}: frame {frame} resampling left {} anchors unplaced ({outcome:?})",
                            feature.describe(),
                            outcome.unresolved()
                        );
                    }
                }
                resampling.record(&resampled);
                wig = resampled.dissolve().0;
            }

            table
                .tabulate(&wig, sequence, feature.interval())
                .wrap_err_with(|| format!("Failed to tabulate {}", feature.describe()))?;
        }

        let census = *selector.census();
        info!(
            "Processed {} of {} features ({} too short, {} without sequence)",
            census.processed(),
            census.features(),
            census.too_short(),
            census.no_sequence()
        );
        let tally = census.tally();
        info!(
            "Reads: {} fetched, {} anchored, {} out of bounds, {} collapsed",
            tally.records, tally.kept, tally.out_of_bounds, tally.collapsed
        );
        if *config.random() {
            info!(
                "Resampling: {} of {} anchors placed across {} features",
                resampling.resolved(),
                resampling.requested(),
                resampling.features()
            );
        }

        Ok(Composition::new(table, census, resampling))
    }
}
