// Browser view seam: the embedded engine that actually renders pages.

/// The embedded browser engine.
///
/// Load results are not reported back; the shell only asks for a page.
pub trait BrowserView {
    /// Starts loading `url` exactly as given. No scheme checks, no normalisation.
    fn load(&mut self, url: &str);
}
