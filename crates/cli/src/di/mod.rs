use rrbridge_application::use_cases::ResolveRecordsUseCase;
use rrbridge_domain::Config;
use rrbridge_infrastructure::dns::HickoryResolverContext;
use std::sync::Arc;
use tracing::debug;

pub struct Services {
    pub resolve: ResolveRecordsUseCase,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let context = Arc::new(HickoryResolverContext::new(&config.resolver)?);
        debug!(servers = context.servers().len(), "Resolver context ready");

        Ok(Self {
            resolve: ResolveRecordsUseCase::new(context),
        })
    }
}
