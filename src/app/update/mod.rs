use gallery_core::cat_api::FetchOptions;
use gallery_core::load_more::Dispatch;

mod core;
mod loading;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    FetchBatch {
        dispatch: Dispatch,
        options: FetchOptions,
    },
    Quit,
}
