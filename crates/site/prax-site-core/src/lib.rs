//! PRAX Site Core
//!
//! The site-level glue around the motion layer: named element refs,
//! section bindings grouped into pages, the preloader, the mobile menu and
//! header, the custom cursor, media fallbacks, the newsletter stub and CDN
//! asset URLs. [`SiteRuntime`] wires the smooth-scroll coordinator, frame
//! ticker and motion engine together for one page view.

pub mod assets;
pub mod config;
pub mod cursor;
pub mod header;
pub mod links;
pub mod media;
pub mod menu;
pub mod newsletter;
pub mod page;
pub mod preloader;
pub mod refs;
pub mod runtime;
pub mod section;

pub use assets::{resolve_asset_url, AssetConfig, AssetKind};
pub use config::SiteConfig;
pub use cursor::{cursor_enabled, CursorFollower, CursorVisuals, Visual};
pub use header::HeaderController;
pub use media::{MediaEvent, MediaState};
pub use menu::MenuController;
pub use newsletter::{NewsletterForm, NewsletterStatus};
pub use page::{MountedPage, Page};
pub use preloader::{Preloader, PreloaderConfig, PreloaderElements, PreloaderPhase};
pub use refs::ElementRefs;
pub use runtime::SiteRuntime;
pub use section::{Section, SectionKind};
