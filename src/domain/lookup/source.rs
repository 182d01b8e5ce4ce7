// src/domain/lookup/source.rs
//
// The capability every lookup origin implements. The resolver iterates a
// fixed list of these; no exceptions cross this boundary. A source that
// cannot produce a name returns a SourceFailure.

use async_trait::async_trait;

use super::value_objects::{ProductSource, ResolvedProduct, SourceFailure};

#[async_trait]
pub trait LookupSource: Send + Sync {
    /// The provenance tag this source stamps on its results
    fn source(&self) -> ProductSource;

    /// Attempt to resolve one barcode. May suspend for one HTTP round trip;
    /// the local catalog implementation never does.
    async fn lookup(&self, barcode: &str) -> Result<ResolvedProduct, SourceFailure>;
}
