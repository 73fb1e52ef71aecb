//! PRAX State Core
//!
//! Three independent observable stores shared by site components: the
//! custom cursor, the preloader and navigation. Each is an explicit handle
//! (cheap to clone) with named mutators and `subscribe`. Fields with a
//! single writer role are guarded by claimable writer tokens.

pub mod cursor;
pub mod error;
pub mod navigation;
pub mod preloader;
pub mod session;
pub mod store;
mod writer;

pub use cursor::{CursorState, CursorStore, CursorVariant};
pub use error::StoreError;
pub use navigation::{HeaderWriter, NavigationState, NavigationStore};
pub use preloader::{PreloaderState, PreloaderStore, ProgressWriter};
pub use session::{MemorySessionStorage, SessionStorage, PRELOADER_SHOWN_KEY};
pub use store::Store;

pub use prax_api_core::Subscription;
