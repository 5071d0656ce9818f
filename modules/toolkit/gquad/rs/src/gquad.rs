use eyre::{OptionExt, Result};
use log::info;
use rand::Rng;

use framekit_core_rs::anchor::{RecordSource, Resolver, Selector};
use framekit_core_rs::loc::{Contig, Feature};
use framekit_core_rs::num::Count;
use framekit_core_rs::seq::SequenceStore;

use crate::config::Config;
use crate::profile::Profile;
use crate::result::Prediction;
use crate::scanner::Scanner;
use crate::shuffle;

/// Density of predicted G-quadruplexes around read anchors.
#[derive(Debug, Clone)]
pub struct GQuad {
    config: Config,
    scanner: Scanner,
}

impl GQuad {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::new(*config.orf())?;
        Ok(Self { config, scanner })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scans the neighbourhood of every anchor. With `random`, anchors are uniformly permuted
    /// over the permitted region of each feature; with `shuffle`, in-frame codons of each scanned
    /// window are shuffled before scanning.
    pub fn run<'a, Ctg: Contig + 'a>(
        &self,
        store: &SequenceStore<Ctg>,
        features: impl IntoIterator<Item = &'a Feature<Ctg>>,
        source: &mut impl RecordSource<Ctg>,
        rng: &mut impl Rng,
    ) -> Result<Prediction> {
        let config = &self.config;
        let mut profile = Profile::new(*config.span_up(), *config.span_down())?;
        let mut selector = Selector::new(
            Resolver::new(*config.endpoint(), *config.collapse()),
            *config.q_area(),
            *config.anti(),
            *config.len_lim(),
        )?;
        let mut hits: Count = 0;
        let mut buffer = Vec::new();

        for feature in features {
            let accept = |pos| config.accepts(pos, feature.interval());
            let selection = match selector.select(feature, store, source, accept)? {
                Some(selection) => selection,
                None => continue,
            };
            let (sequence, mut wig) = selection.dissolve();
            let origin = feature.origin();

            if *config.random() {
                shuffle::randomize(&mut wig, config.permitted(feature.interval()), rng);
            }

            for (pos, count) in wig.iter() {
                let window = config.scan_window(pos);
                let subsequence = sequence
                    .get(window.start as usize..window.end as usize)
                    .ok_or_eyre("Scan window leaves the reference sequence")?;

                let scanned = if *config.shuffle() {
                    buffer.clear();
                    buffer.extend_from_slice(subsequence);
                    let first = shuffle::first_in_frame(window.start, origin);
                    shuffle::frame_shuffle(&mut buffer, first, rng);
                    buffer.as_slice()
                } else {
                    subsequence
                };

                let shift = config.span_up() + config.margin();
                for hit in self.scanner.scan(scanned, window.start, origin) {
                    hits += count;
                    for i in *hit.start()..*hit.end() {
                        profile.cover(i as i64 - shift, count);
                    }
                }
                profile.add_records(count);
            }
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
            "Reads: {} fetched, {} anchored, {} out of bounds, {} collapsed; {} motif hits",
            tally.records, tally.kept, tally.out_of_bounds, tally.collapsed, hits
        );

        Ok(Prediction::new(profile, census, hits))
    }
}
