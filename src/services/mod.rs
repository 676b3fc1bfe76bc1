// Collaborators the session controller talks to.
// Each is a trait so the GUI, the console front end, and tests can plug in their own.

pub mod browser_view;
pub mod clock;
pub mod notifier;
pub mod proxy;

pub use browser_view::BrowserView;
pub use clock::{Clock, SystemClock};
pub use notifier::Notifier;
pub use proxy::ProxySubsystem;
