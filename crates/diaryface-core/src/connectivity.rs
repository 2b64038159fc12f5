//! Transport and companion-app liveness with edge detection.

use log::info;

/// One-shot transition the display and haptics react to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkEdge {
    TransportLost,
    TransportRestored,
    AppLost,
    AppRestored,
}

impl LinkEdge {
    pub const fn is_loss(self) -> bool {
        matches!(self, Self::TransportLost | Self::AppLost)
    }
}

/// Tracks the two liveness signals separately.
///
/// A dead transport implies an unreachable app, but a live transport says
/// nothing about the app: the companion may not be running. Each signal keeps
/// the value the display last reflected (`*_shown`) so edges fire once.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConnectivityTracker {
    transport: bool,
    app: bool,
    transport_shown: bool,
    app_shown: bool,
}

impl ConnectivityTracker {
    /// Starts from the platform's current transport state. The app is
    /// presumed reachable until a send proves otherwise.
    pub const fn new(transport_connected: bool) -> Self {
        Self {
            transport: transport_connected,
            app: transport_connected,
            transport_shown: transport_connected,
            app_shown: transport_connected,
        }
    }

    pub const fn transport_connected(&self) -> bool {
        self.transport
    }

    pub const fn app_connected(&self) -> bool {
        self.transport && self.app
    }

    pub fn set_transport(&mut self, connected: bool) -> Option<LinkEdge> {
        self.transport = connected;
        self.evaluate()
    }

    /// A send failed because the peer app could not be reached.
    pub fn app_unreachable(&mut self) -> Option<LinkEdge> {
        self.app = false;
        self.evaluate()
    }

    /// Any recognized inbound message proves the app is alive.
    pub fn app_heard(&mut self) -> Option<LinkEdge> {
        self.app = true;
        self.evaluate()
    }

    fn evaluate(&mut self) -> Option<LinkEdge> {
        if self.transport != self.transport_shown {
            self.transport_shown = self.transport;
            // The app signal folds into the transport edge in both directions.
            self.app = self.transport;
            self.app_shown = self.transport;

            let edge = if self.transport {
                LinkEdge::TransportRestored
            } else {
                LinkEdge::TransportLost
            };
            info!("link edge {:?}", edge);
            return Some(edge);
        }

        if !self.transport || self.app == self.app_shown {
            return None;
        }

        self.app_shown = self.app;
        let edge = if self.app {
            LinkEdge::AppRestored
        } else {
            LinkEdge::AppLost
        };
        info!("link edge {:?}", edge);
        Some(edge)
    }
}
