//! Running the async parts of the crate from synchronous code
//!
//! Render loops are usually synchronous, while route fetching is async. With
//! the `tokio-runtime` feature a short-lived current-thread runtime drives the
//! future so that `reqwest` has a reactor; without it the `futures` executor
//! is used, which only suits providers that do no I/O.
//!
//! Must not be called from inside an async context.

use crate::prelude::Future;
use crate::Result;

#[cfg(feature = "tokio-runtime")]
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let runtime = ::tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

#[cfg(not(feature = "tokio-runtime"))]
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    futures::executor::block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RouteProfile;
    use crate::core::geo::LatLng;
    use crate::routing::{RouteProvider, RouteRequest, StaticRouteProvider};

    #[test]
    fn test_block_on_runs_provider() {
        let request = RouteRequest::new(
            RouteProfile::Walking,
            vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)],
        );
        let provider = StaticRouteProvider::straight_line();
        let route = block_on(provider.fetch_route(&request)).unwrap();
        assert_eq!(route.geometry.len(), 2);
    }
}
