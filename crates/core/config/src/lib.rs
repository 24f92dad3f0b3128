use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Meld.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Meld.toml").exists() {
            builder = builder.add_source(File::new("Meld.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiLimits {
    pub json_payload_mb: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub limits: ApiLimits,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub api: Api,
}

pub async fn init() {
    println!(
        ":: Meld Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}
