use crate::record::ResolvedRecord;

/// Storage for resolved gene sets.
pub trait PersistenceSink {
    /// Stores one gene set and returns the id it was stored under.
    fn insert_geneset(&mut self, record: &ResolvedRecord) -> anyhow::Result<i64>;
}
