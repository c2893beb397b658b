#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application ready; loads the first page of the initial spec.
    Started,
    /// User picked a region.
    RegionSelected(crate::Region),
    /// User edited the errors-per-record input (raw text from slider or box).
    ErrorCountChanged(String),
    /// User edited the seed input.
    SeedChanged(String),
    /// User clicked Generate Random Seed.
    GenerateRandomSeedClicked,
    /// Explicit request for the next page.
    NextPageRequested,
    /// Viewport or content geometry changed (scroll, resize, new rows).
    ViewportChanged(crate::ViewportGeometry),
    /// Engine completion for a page fetch.
    PageLoaded {
        epoch: crate::Epoch,
        page: u32,
        result: Result<Vec<crate::Record>, crate::PageFailure>,
    },
    /// User clicked Export to CSV.
    ExportClicked,
    /// Export effect finished.
    ExportFinished(crate::ExportStatus),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
