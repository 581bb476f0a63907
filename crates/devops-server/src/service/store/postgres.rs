use async_trait::async_trait;
use devops_postgres::{PgClient, PgError};

use super::RelationalStore;
use crate::service::names;
use crate::{Error, Result};

fn into_service_error(error: PgError) -> Error {
    Error::external(names::POSTGRES, error.to_string()).with_source(error)
}

#[async_trait]
impl RelationalStore for PgClient {
    async fn ping(&self) -> Result<()> {
        PgClient::ping(self).await.map_err(into_service_error)
    }
}
