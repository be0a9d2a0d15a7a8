//! Campaign persistence.
//!
//! Every entity kind lives in its own JSON file holding an array of
//! records. Saving always rewrites the whole file for that kind. A file
//! that does not exist yet loads as an empty collection; a file that
//! exists but does not parse is an error, so campaign data is never
//! silently dropped.

use crate::config::StorageConfig;
use crate::world::{names_match, Character, God, Shop, Shopkeep, Tavern, Town};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The kinds of records a campaign keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    God,
    Shop,
    Town,
    Shopkeep,
    Tavern,
}

impl EntityKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            EntityKind::Character => "characters.json",
            EntityKind::God => "gods.json",
            EntityKind::Shop => "shops.json",
            EntityKind::Town => "towns.json",
            EntityKind::Shopkeep => "shopkeeps.json",
            EntityKind::Tavern => "taverns.json",
        }
    }

    /// Singular lower-case noun, as used in commands ("add shopkeep").
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::God => "god",
            EntityKind::Shop => "shop",
            EntityKind::Town => "town",
            EntityKind::Shopkeep => "shopkeep",
            EntityKind::Tavern => "tavern",
        }
    }

    pub fn all() -> [EntityKind; 6] {
        [
            EntityKind::Character,
            EntityKind::God,
            EntityKind::Shop,
            EntityKind::Town,
            EntityKind::Shopkeep,
            EntityKind::Tavern,
        ]
    }

    pub fn from_label(label: &str) -> Option<EntityKind> {
        EntityKind::all()
            .into_iter()
            .find(|kind| kind.label() == label)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A record stored in one of the repository's collections.
pub trait Entity: Serialize + DeserializeOwned + Sized {
    const KIND: EntityKind;

    fn name(&self) -> &str;

    /// Human-readable block shown by `info` and listing commands.
    fn display_info(&self) -> String;

    fn collection(repo: &Repository) -> &[Self];

    fn collection_mut(repo: &mut Repository) -> &mut Vec<Self>;
}

macro_rules! entity {
    ($ty:ty, $kind:expr, $field:ident) => {
        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn name(&self) -> &str {
                &self.name
            }

            fn display_info(&self) -> String {
                <$ty>::display_info(self)
            }

            fn collection(repo: &Repository) -> &[Self] {
                &repo.$field
            }

            fn collection_mut(repo: &mut Repository) -> &mut Vec<Self> {
                &mut repo.$field
            }
        }
    };
}

entity!(Character, EntityKind::Character, characters);
entity!(God, EntityKind::God, gods);
entity!(Shop, EntityKind::Shop, shops);
entity!(Town, EntityKind::Town, towns);
entity!(Shopkeep, EntityKind::Shopkeep, shopkeeps);
entity!(Tavern, EntityKind::Tavern, taverns);

/// Load a collection from `path`. A missing file is an empty collection.
pub async fn load_collection<T: Entity>(path: &Path) -> Result<Vec<T>, PersistError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved {}s yet", T::KIND);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the file at `path` with `items`.
pub async fn save_collection<T: Entity>(path: &Path, items: &[T]) -> Result<(), PersistError> {
    let content = serde_json::to_string_pretty(items).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(path, content)
        .await
        .map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), count = items.len(), "saved {}s", T::KIND);
    Ok(())
}

/// First entity whose name matches, ignoring case.
pub fn find_by_name<'a, T: Entity>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| names_match(item.name(), name))
}

/// In-memory campaign: one insertion-ordered collection per entity kind.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    config: StorageConfig,
    pub characters: Vec<Character>,
    pub gods: Vec<God>,
    pub shops: Vec<Shop>,
    pub towns: Vec<Town>,
    pub shopkeeps: Vec<Shopkeep>,
    pub taverns: Vec<Tavern>,
}

impl Repository {
    /// An empty campaign that will save into `config`'s directory.
    pub fn empty(config: StorageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Load every collection from `config`'s directory.
    pub async fn load(config: StorageConfig) -> Result<Self, PersistError> {
        let repo = Self {
            characters: load_collection(&config.path_for(EntityKind::Character)).await?,
            gods: load_collection(&config.path_for(EntityKind::God)).await?,
            shops: load_collection(&config.path_for(EntityKind::Shop)).await?,
            towns: load_collection(&config.path_for(EntityKind::Town)).await?,
            shopkeeps: load_collection(&config.path_for(EntityKind::Shopkeep)).await?,
            taverns: load_collection(&config.path_for(EntityKind::Tavern)).await?,
            config,
        };
        info!(
            data_dir = %repo.config.data_dir.display(),
            characters = repo.characters.len(),
            gods = repo.gods.len(),
            shops = repo.shops.len(),
            towns = repo.towns.len(),
            shopkeeps = repo.shopkeeps.len(),
            taverns = repo.taverns.len(),
            "campaign loaded"
        );
        Ok(repo)
    }

    pub fn all<T: Entity>(&self) -> &[T] {
        T::collection(self)
    }

    pub fn find<T: Entity>(&self, name: &str) -> Option<&T> {
        find_by_name(T::collection(self), name)
    }

    pub fn find_mut<T: Entity>(&mut self, name: &str) -> Option<&mut T> {
        T::collection_mut(self)
            .iter_mut()
            .find(|item| names_match(item.name(), name))
    }

    pub fn contains<T: Entity>(&self, name: &str) -> bool {
        self.find::<T>(name).is_some()
    }

    /// Append `item` and save its whole collection.
    pub async fn insert<T: Entity>(&mut self, item: T) -> Result<(), PersistError> {
        T::collection_mut(self).push(item);
        self.persist::<T>().await
    }

    /// Save the whole collection of `T`.
    pub async fn persist<T: Entity>(&self) -> Result<(), PersistError> {
        save_collection(&self.config.path_for(T::KIND), T::collection(self)).await
    }

    /// Save the collection for `kind`.
    pub async fn save(&self, kind: EntityKind) -> Result<(), PersistError> {
        match kind {
            EntityKind::Character => self.persist::<Character>().await,
            EntityKind::God => self.persist::<God>().await,
            EntityKind::Shop => self.persist::<Shop>().await,
            EntityKind::Town => self.persist::<Town>().await,
            EntityKind::Shopkeep => self.persist::<Shopkeep>().await,
            EntityKind::Tavern => self.persist::<Tavern>().await,
        }
    }

    pub async fn save_all(&self) -> Result<(), PersistError> {
        for kind in EntityKind::all() {
            self.save(kind).await?;
        }
        Ok(())
    }
}
