use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{error, info};

use super::data::{Album, EnrichedPhoto, Photo, User};
use crate::error::{CatalogError, DataIntegrityError, Result};

const USERS_FILE: &str = "users.json";
const ALBUMS_FILE: &str = "albums.json";
const PHOTOS_FILE: &str = "photos.json";

/// Mock data shipped with the application
const BUILTIN_USERS: &str = include_str!("../../data/users.json");
const BUILTIN_ALBUMS: &str = include_str!("../../data/albums.json");
const BUILTIN_PHOTOS: &str = include_str!("../../data/photos.json");

/// The Catalog holds the three static source tables.
/// They are loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    users: Vec<User>,
    albums: Vec<Album>,
    photos: Vec<Photo>,
}

impl Catalog {
    /// Create a catalog from tables already in memory.
    /// Not validated; `enrich` reports any broken foreign key.
    pub fn from_parts(users: Vec<User>, albums: Vec<Album>, photos: Vec<Photo>) -> Self {
        Self { users, albums, photos }
    }

    /// Load the mock data embedded in the binary
    pub fn builtin() -> Result<Self> {
        let catalog = Self {
            users: parse_table(BUILTIN_USERS, Path::new(USERS_FILE))?,
            albums: parse_table(BUILTIN_ALBUMS, Path::new(ALBUMS_FILE))?,
            photos: parse_table(BUILTIN_PHOTOS, Path::new(PHOTOS_FILE))?,
        };

        catalog.log_loaded("built-in data");
        catalog.validated()
    }

    /// Load `users.json`, `albums.json` and `photos.json` from a directory
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let catalog = Self {
            users: read_table(&dir.join(USERS_FILE))?,
            albums: read_table(&dir.join(ALBUMS_FILE))?,
            photos: read_table(&dir.join(PHOTOS_FILE))?,
        };

        catalog.log_loaded(&dir.display().to_string());
        catalog.validated()
    }

    /// Unresolved ids are fatal at load time
    fn validated(self) -> Result<Self> {
        self.enrich()?;
        Ok(self)
    }

    fn log_loaded(&self, source: &str) {
        info!(
            "Catalog loaded from {}: {} users, {} albums, {} photos",
            source,
            self.users.len(),
            self.albums.len(),
            self.photos.len()
        );
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Uploader names for the filter tabs, in table order
    pub fn user_names(&self) -> Vec<&str> {
        self.users.iter().map(|user| user.name.as_str()).collect()
    }

    /// Album titles for the filter buttons, in table order
    pub fn album_titles(&self) -> Vec<&str> {
        self.albums.iter().map(|album| album.title.as_str()).collect()
    }

    /// Join this catalog's tables into enriched photos
    pub fn enrich(&self) -> std::result::Result<Vec<EnrichedPhoto>, DataIntegrityError> {
        join(&self.photos, &self.albums, &self.users)
    }
}

/// Resolve every photo's album and that album's user.
///
/// Output preserves the input photo order, one record per photo. Any id
/// that does not resolve to exactly one record fails the whole join.
pub fn join(
    photos: &[Photo],
    albums: &[Album],
    users: &[User],
) -> std::result::Result<Vec<EnrichedPhoto>, DataIntegrityError> {
    let result = index_tables(albums, users)
        .and_then(|(albums_by_id, users_by_id)| resolve_all(photos, &albums_by_id, &users_by_id));

    if let Err(e) = &result {
        error!("Catalog join failed: {}", e);
    }

    result
}

fn resolve_all(
    photos: &[Photo],
    albums_by_id: &HashMap<i64, &Album>,
    users_by_id: &HashMap<i64, &User>,
) -> std::result::Result<Vec<EnrichedPhoto>, DataIntegrityError> {
    let mut enriched = Vec::with_capacity(photos.len());

    for photo in photos {
        let album = albums_by_id
            .get(&photo.album_id)
            .ok_or(DataIntegrityError::MissingAlbum {
                photo_id: photo.id,
                album_id: photo.album_id,
            })?;
        let user = users_by_id
            .get(&album.user_id)
            .ok_or(DataIntegrityError::MissingUser {
                album_id: album.id,
                user_id: album.user_id,
            })?;

        enriched.push(EnrichedPhoto::new(photo, album, user));
    }

    Ok(enriched)
}

type Indexes<'a> = (HashMap<i64, &'a Album>, HashMap<i64, &'a User>);

fn index_tables<'a>(
    albums: &'a [Album],
    users: &'a [User],
) -> std::result::Result<Indexes<'a>, DataIntegrityError> {
    let mut albums_by_id = HashMap::with_capacity(albums.len());
    for album in albums {
        if albums_by_id.insert(album.id, album).is_some() {
            return Err(DataIntegrityError::DuplicateAlbum { id: album.id });
        }
    }

    let mut users_by_id = HashMap::with_capacity(users.len());
    for user in users {
        if users_by_id.insert(user.id, user).is_some() {
            return Err(DataIntegrityError::DuplicateUser { id: user.id });
        }
    }

    Ok((albums_by_id, users_by_id))
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&contents, path)
}

fn parse_table<T: DeserializeOwned>(json: &str, path: &Path) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| CatalogError::Json {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Sex;

    fn user(id: i64, name: &str) -> User {
        User { id, name: name.to_string(), sex: Sex::Female }
    }

    fn album(id: i64, title: &str, user_id: i64) -> Album {
        Album { id, title: title.to_string(), user_id }
    }

    fn photo(id: i64, title: &str, album_id: i64) -> Photo {
        Photo { id, title: title.to_string(), album_id }
    }

    #[test]
    fn test_join_preserves_photo_order() {
        let users = vec![user(100, "Amy"), user(200, "Bob")];
        let albums = vec![album(10, "Animals", 100), album(20, "Cars", 200)];
        let photos = vec![photo(3, "Truck", 20), photo(1, "Cat", 10), photo(2, "Dog", 10)];

        let enriched = join(&photos, &albums, &users).unwrap();

        let ids: Vec<i64> = enriched.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(enriched[0].album, albums[1]);
        assert_eq!(enriched[0].user, users[1]);
        assert_eq!(enriched[1].user_name(), "Amy");
    }

    #[test]
    fn test_join_missing_album_fails() {
        let users = vec![user(100, "Amy")];
        let albums = vec![album(10, "Animals", 100)];
        let photos = vec![photo(1, "Cat", 10), photo(2, "Ghost", 99)];

        let err = join(&photos, &albums, &users).unwrap_err();
        assert_eq!(err, DataIntegrityError::MissingAlbum { photo_id: 2, album_id: 99 });
    }

    #[test]
    fn test_join_missing_user_fails() {
        let users = vec![user(100, "Amy")];
        let albums = vec![album(10, "Orphans", 7)];
        let photos = vec![photo(1, "Cat", 10)];

        let err = join(&photos, &albums, &users).unwrap_err();
        assert_eq!(err, DataIntegrityError::MissingUser { album_id: 10, user_id: 7 });
    }

    #[test]
    fn test_join_duplicate_ids_fail() {
        let users = vec![user(100, "Amy"), user(100, "Also Amy")];
        let albums = vec![album(10, "Animals", 100)];
        assert_eq!(
            join(&[], &albums, &users).unwrap_err(),
            DataIntegrityError::DuplicateUser { id: 100 }
        );

        let users = vec![user(100, "Amy")];
        let albums = vec![album(10, "Animals", 100), album(10, "Again", 100)];
        assert_eq!(
            join(&[], &albums, &users).unwrap_err(),
            DataIntegrityError::DuplicateAlbum { id: 10 }
        );
    }

    #[test]
    fn test_join_empty_photos_is_empty() {
        let enriched = join(&[], &[], &[]).unwrap();
        assert!(enriched.is_empty());
    }

    #[test]
    fn test_builtin_catalog_joins() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.users().is_empty());

        let enriched = catalog.enrich().unwrap();
        assert_eq!(enriched.len(), catalog.photos().len());
        assert_eq!(catalog.user_names().len(), catalog.users().len());
        assert_eq!(catalog.album_titles().len(), catalog.albums().len());
    }

    #[test]
    fn test_load_dir_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    fn write_fixtures(dir: &Path, users: &str, albums: &str, photos: &str) {
        fs::write(dir.join(USERS_FILE), users).unwrap();
        fs::write(dir.join(ALBUMS_FILE), albums).unwrap();
        fs::write(dir.join(PHOTOS_FILE), photos).unwrap();
    }

    #[test]
    fn test_load_dir_reads_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(
            dir.path(),
            r#"[{"id":100,"name":"Amy","sex":"f"}]"#,
            r#"[{"id":10,"title":"Animals","userId":100}]"#,
            r#"[{"id":1,"title":"Cat","albumId":10},{"id":2,"title":"Dog","albumId":10}]"#,
        );

        let catalog = Catalog::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.user_names(), vec!["Amy"]);
        assert_eq!(catalog.enrich().unwrap().len(), 2);
    }

    #[test]
    fn test_load_dir_unresolved_user_is_integrity_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(
            dir.path(),
            r#"[{"id":100,"name":"Amy","sex":"f"}]"#,
            r#"[{"id":10,"title":"Animals","userId":99}]"#,
            r#"[{"id":1,"title":"Cat","albumId":10}]"#,
        );

        let err = Catalog::load_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Integrity(DataIntegrityError::MissingUser { album_id: 10, user_id: 99 })
        ));
    }

    #[test]
    fn test_parse_table_reports_json_error() {
        let err = parse_table::<User>("[{\"id\": 1}]", Path::new(USERS_FILE)).unwrap_err();
        match err {
            CatalogError::Json { path, .. } => assert_eq!(path, PathBuf::from(USERS_FILE)),
            other => panic!("expected JSON error, got {:?}", other),
        }
    }
}
