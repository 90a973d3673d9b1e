use super::DataMode;
use crate::models::{Athlete, Coach};

/// Shown when an entity has no photo at all (a 1x1 grey PNG)
pub const DEFAULT_PHOTO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAAAAAA6fptVAAAACklEQVR4nGNoAAAAggCBd81ytgAAAABJRU5ErkJggg==";

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/200x200?text=";

pub trait HasPhoto {
    /// Text printed on the mock-mode placeholder
    const PLACEHOLDER_TEXT: &'static str;

    fn photo_path(&self) -> Option<&str>;
    fn image_url(&self) -> Option<&str>;
}

impl HasPhoto for Athlete {
    const PLACEHOLDER_TEXT: &'static str = "Athlete";

    fn photo_path(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

impl HasPhoto for Coach {
    const PLACEHOLDER_TEXT: &'static str = "Coach";

    fn photo_path(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// URL to display for an entity's photo.
///
/// A backend `image_url` wins, `data:` URLs included. A stored path is served
/// from `storage_url` in live mode; mock data only gets a placeholder.
pub fn resolve_photo_url<E: HasPhoto>(entity: &E, mode: DataMode, storage_url: &str) -> String {
    if let Some(url) = entity.image_url().filter(|u| !u.is_empty()) {
        return url.to_string();
    }

    match entity.photo_path().filter(|p| !p.is_empty()) {
        None => DEFAULT_PHOTO.to_string(),
        Some(_) if mode.is_mock() => format!("{}{}", PLACEHOLDER_BASE, E::PLACEHOLDER_TEXT),
        Some(path) => format!(
            "{}/{}",
            storage_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;

    const STORAGE: &str = "http://localhost:8000/storage/";

    fn athlete(id: i64) -> Athlete {
        MockStore::load().unwrap().find(id).unwrap()
    }

    #[test]
    fn test_image_url_is_used_verbatim() {
        let mut a = athlete(2);
        a.image_url = Some("data:image/jpeg;base64,AAAA".to_string());
        assert_eq!(
            resolve_photo_url(&a, DataMode::Live, STORAGE),
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_stored_path_uses_storage_url() {
        let a = athlete(1);
        assert_eq!(
            resolve_photo_url(&a, DataMode::Live, STORAGE),
            "http://localhost:8000/storage/athletes/joao-silva.jpg"
        );
    }

    #[test]
    fn test_mock_mode_uses_placeholder() {
        let a = athlete(1);
        assert_eq!(
            resolve_photo_url(&a, DataMode::Mock, STORAGE),
            "https://via.placeholder.com/200x200?text=Athlete"
        );
    }

    #[test]
    fn test_missing_photo_uses_default() {
        let a = athlete(2);
        assert_eq!(resolve_photo_url(&a, DataMode::Live, STORAGE), DEFAULT_PHOTO);
    }
}
