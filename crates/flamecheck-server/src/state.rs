use std::sync::Arc;

use anyhow::{Context, Result};
use flamecheck_config::AppConfig;
use flamecheck_core::{DirectoryReferences, ReferenceSource};
use tracing::{info, warn};

use crate::services::pages::PageTemplates;
use crate::services::uploads::UploadStore;

pub struct ServerState {
    pub config: AppConfig,
    pub pages: PageTemplates,
    pub references: Arc<dyn ReferenceSource>,
    pub uploads: UploadStore,
}

impl ServerState {
    pub async fn init(config: AppConfig) -> Result<Self> {
        let pages = PageTemplates::load(&config.templates_dir).await?;

        let uploads = UploadStore::open(&config.upload_dir)
            .await
            .with_context(|| format!("failed to create {}", config.upload_dir.display()))?;

        for dir in [&config.fire_dir, &config.no_fire_dir] {
            if !dir.is_dir() {
                warn!("Reference directory missing: {}", dir.display());
            }
        }

        info!("Uploads: {}", uploads.dir().display());
        info!(
            "References: fire={} no_fire={}",
            config.fire_dir.display(),
            config.no_fire_dir.display()
        );
        if config.enforce_extensions {
            info!("Extension allow-list enforced");
        }

        let references: Arc<dyn ReferenceSource> = Arc::new(DirectoryReferences::new(
            &config.fire_dir,
            &config.no_fire_dir,
        ));

        Ok(Self {
            config,
            pages,
            references,
            uploads,
        })
    }
}
