// Proxy seam: installs the application-wide HTTP proxy used by the browser view.

use crate::types::errors::ProxyError;
use crate::types::proxy::ProxyDescriptor;

pub trait ProxySubsystem {
    /// Makes `proxy` the proxy for every request the browser view issues from
    /// now on. Connectivity through the proxy is not checked.
    fn set_application_proxy(&mut self, proxy: &ProxyDescriptor) -> Result<(), ProxyError>;
}
