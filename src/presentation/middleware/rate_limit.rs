use axum::{body::Body, extract::ConnectInfo};
use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor};

pub type AuthRateLimitLayer = GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>;

/// Keys requests by peer address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerIpKeyExtractor;

impl KeyExtractor for PeerIpKeyExtractor {
    type Key = IpAddr;

    fn extract<B>(
        &self,
        req: &axum::http::Request<B>,
    ) -> Result<Self::Key, tower_governor::errors::GovernorError> {
        // Without connect info (router tests) everything shares the loopback bucket
        Ok(req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}

pub fn rate_limit_layer(requests_per_minute: u32) -> anyhow::Result<AuthRateLimitLayer> {
    let requests_per_minute = requests_per_minute.max(1);
    let quota_duration_ms = 60_000 / u64::from(requests_per_minute);

    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(quota_duration_ms.max(1))
            .burst_size(requests_per_minute)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Failed to finish governor config"))?,
    );

    Ok(GovernorLayer::new(config))
}
