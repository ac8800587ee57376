use super::models::Photo;
use std::collections::HashSet;

/// Photos in first-seen order, unique by id
#[derive(Debug, Clone, Default)]
pub struct PhotoCollection {
    photos: Vec<Photo>,
    ids: HashSet<String>,
}

impl PhotoCollection {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Appends the photo unless one with the same id is already present.
    /// Returns whether it was added; duplicates are dropped, never merged.
    pub fn add(&mut self, photo: Photo) -> bool {
        if self.ids.contains(&photo.id) {
            return false;
        }
        self.ids.insert(photo.id.clone());
        self.photos.push(photo);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.photos.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Photo> {
        self.photos
    }
}

#[cfg(test)]
pub(crate) fn photo(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        urls: [("regular".to_string(), format!("https://images.example.com/{}", id))]
            .into_iter()
            .collect(),
        width: None,
        height: None,
        color: None,
        description: None,
        alt_description: None,
        created_at: None,
        user: None,
    }
}
