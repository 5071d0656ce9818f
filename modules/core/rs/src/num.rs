use std::fmt::Debug;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// Genomic coordinate. Signed, so that offsets upstream of an anchor never wrap around.
pub type Pos = i64;

/// Multiplicity of an anchor or of a tabulated token.
pub type Count = u64;
