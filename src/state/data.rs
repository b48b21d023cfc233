/// Shared data structures for the photo catalog
///
/// These structs represent the data model that flows between
/// the catalog (static source tables) and the query layer.

use serde::{Deserialize, Serialize};

/// Uploader's sex, as stored in the fixtures ("m" / "f")
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

/// A user who owns albums
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub sex: Sex,
}

impl User {
    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    /// Style class for the uploader cell: links for male uploaders,
    /// danger-highlighted for female ones
    pub fn name_class(&self) -> &'static str {
        if self.is_male() {
            "has-text-link"
        } else {
            "has-text-danger"
        }
    }
}

/// An album, owned by exactly one user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub title: String,
    /// Foreign key into the users table
    pub user_id: i64,
}

/// A single photo, filed in exactly one album
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub title: String,
    /// Foreign key into the albums table
    pub album_id: i64,
}

/// A photo denormalized with its resolved album and uploader
///
/// Built once by `library::join` and never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPhoto {
    pub id: i64,
    pub title: String,
    pub album_id: i64,
    pub album: Album,
    pub user: User,
}

impl EnrichedPhoto {
    /// Combine a photo with the album and user it resolves to
    pub fn new(photo: &Photo, album: &Album, user: &User) -> Self {
        Self {
            id: photo.id,
            title: photo.title.clone(),
            album_id: photo.album_id,
            album: album.clone(),
            user: user.clone(),
        }
    }

    /// Title of the album this photo belongs to
    pub fn album_title(&self) -> &str {
        &self.album.title
    }

    /// Name of the user who uploaded the album
    pub fn user_name(&self) -> &str {
        &self.user.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_uses_single_letter_codes() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"Roma","sex":"m"}"#).unwrap();
        assert_eq!(user.sex, Sex::Male);
        assert!(user.is_male());

        let json = serde_json::to_string(&Sex::Female).unwrap();
        assert_eq!(json, r#""f""#);
    }

    #[test]
    fn test_name_class_follows_sex() {
        let roma = User { id: 1, name: "Roma".to_string(), sex: Sex::Male };
        let anna = User { id: 2, name: "Anna".to_string(), sex: Sex::Female };

        assert_eq!(roma.name_class(), "has-text-link");
        assert_eq!(anna.name_class(), "has-text-danger");
    }

    #[test]
    fn test_foreign_keys_are_camel_case() {
        let album: Album =
            serde_json::from_str(r#"{"id":10,"title":"Animals","userId":100}"#).unwrap();
        assert_eq!(album.user_id, 100);

        let photo: Photo = serde_json::from_str(r#"{"id":1,"title":"Cat","albumId":10}"#).unwrap();
        assert_eq!(photo.album_id, 10);
    }

    #[test]
    fn test_enriched_photo_copies_related_records() {
        let user = User { id: 100, name: "Amy".to_string(), sex: Sex::Female };
        let album = Album { id: 10, title: "Animals".to_string(), user_id: 100 };
        let photo = Photo { id: 1, title: "Cat".to_string(), album_id: 10 };

        let enriched = EnrichedPhoto::new(&photo, &album, &user);

        assert_eq!(enriched.id, 1);
        assert_eq!(enriched.title, "Cat");
        assert_eq!(enriched.album, album);
        assert_eq!(enriched.user, user);
        assert_eq!(enriched.album_title(), "Animals");
        assert_eq!(enriched.user_name(), "Amy");
    }
}
