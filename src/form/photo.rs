use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::form::preview::{PreviewHandle, PreviewRegistry};

pub const MAX_PHOTOS: usize = 20;

const IMAGE_PATTERN: &str = "*.{jpg,jpeg,png,gif,webp,bmp,heic}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct Photo {
    source: SourceFile,
    preview: PreviewHandle,
}

impl Photo {
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }

    pub fn to_ref(&self) -> PhotoRef {
        PhotoRef {
            source: self.source.path.clone(),
            preview_url: self.preview.url().to_string(),
        }
    }
}

/// Non-owning snapshot of a photo, as reported to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub source: PathBuf,
    pub preview_url: String,
}

/// Ordered photo list with drag-to-reorder. Index 0 is the cover.
#[derive(Debug)]
pub struct PhotoList {
    photos: Vec<Photo>,
    dragged: Option<usize>,
    error: bool,
    registry: PreviewRegistry,
}

impl PhotoList {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            photos: Vec::new(),
            dragged: None,
            error: false,
            registry,
        }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    pub fn cover(&self) -> Option<&Photo> {
        self.photos.first()
    }

    pub fn is_cover(index: usize) -> bool {
        index == 0
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn remaining(&self) -> usize {
        MAX_PHOTOS.saturating_sub(self.photos.len())
    }

    pub fn refs(&self) -> Vec<PhotoRef> {
        self.photos.iter().map(Photo::to_ref).collect()
    }

    /// Appends one photo per file and keeps the first `MAX_PHOTOS`.
    /// Returns how many of the new files were kept.
    pub fn add(&mut self, files: impl IntoIterator<Item = SourceFile>) -> usize {
        let before = self.photos.len();
        for source in files {
            let preview = self.registry.mint(&source);
            self.photos.push(Photo { source, preview });
        }
        let offered = self.photos.len() - before;
        self.photos.truncate(MAX_PHOTOS);
        let kept = self.photos.len() - before;
        if !self.photos.is_empty() {
            self.error = false;
        }
        debug!(offered, kept, total = self.photos.len(), "photos added");
        kept
    }

    pub fn begin_drag(&mut self, index: usize) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        self.dragged = Some(index);
        true
    }

    /// Moves the dragged photo to `target`. Repeating the same target is a no-op.
    pub fn drag_over(&mut self, target: usize) -> bool {
        let Some(from) = self.dragged else {
            return false;
        };
        if from == target || from >= self.photos.len() || target >= self.photos.len() {
            return false;
        }
        let photo = self.photos.remove(from);
        self.photos.insert(target, photo);
        self.dragged = Some(target);
        debug!(from, to = target, "photo reordered");
        true
    }

    pub fn end_drag(&mut self) -> Option<usize> {
        self.dragged.take()
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        self.photos.remove(index);
        self.dragged = match self.dragged {
            Some(dragged) if dragged == index => None,
            Some(dragged) if dragged > index => Some(dragged - 1),
            other => other,
        };
        if self.photos.is_empty() {
            self.error = true;
        }
        debug!(index, total = self.photos.len(), "photo removed");
        true
    }

    pub fn validate(&mut self) -> bool {
        if self.photos.is_empty() {
            self.error = true;
            return false;
        }
        true
    }
}

/// Expands a path, directory, or file-name glob into image files.
///
/// A directory yields its image files; a glob may only use wildcards in the
/// final path component. Results are sorted by path.
pub fn resolve_files(pattern: &str) -> Result<Vec<SourceFile>> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Err(AppError::NoMatch(String::new()));
    }
    let expanded = expand_home(trimmed);
    let path = Path::new(&expanded);

    let files = if !has_wildcard(&expanded) {
        if path.is_file() {
            vec![SourceFile::new(path)]
        } else if path.is_dir() {
            let images = image_matcher()?;
            list_matching(path, |name| images.is_match(name))?
        } else {
            Vec::new()
        }
    } else {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if has_wildcard(&dir.to_string_lossy()) {
            return Err(AppError::WildcardDirectory(trimmed.to_string()));
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return Err(AppError::NoMatch(trimmed.to_string()));
        };
        let matcher = GlobBuilder::new(name)
            .case_insensitive(true)
            .literal_separator(true)
            .build()?
            .compile_matcher();
        list_matching(&dir, |file_name| matcher.is_match(file_name))?
    };

    if files.is_empty() {
        return Err(AppError::NoMatch(trimmed.to_string()));
    }
    Ok(files)
}

fn image_matcher() -> Result<GlobSet> {
    let glob = GlobBuilder::new(IMAGE_PATTERN)
        .case_insensitive(true)
        .build()?;
    let mut builder = GlobSetBuilder::new();
    builder.add(glob);
    Ok(builder.build()?)
}

fn list_matching(dir: &Path, accept: impl Fn(&str) -> bool) -> Result<Vec<SourceFile>> {
    let entries = fs::read_dir(dir).map_err(|source| AppError::PhotoDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| accept(name))
        })
        .collect();
    paths.sort();
    Ok(paths.into_iter().map(SourceFile::new).collect())
}

fn has_wildcard(value: &str) -> bool {
    value.contains(['*', '?', '[', '{'])
}

fn expand_home(value: &str) -> String {
    if let Some(rest) = value.strip_prefix("~/")
        && let Some(home) = env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest).to_string_lossy().into_owned();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::{MAX_PHOTOS, PhotoList, SourceFile, resolve_files};
    use crate::error::AppError;
    use crate::form::preview::PreviewRegistry;
    use std::fs;

    fn files(names: &[&str]) -> Vec<SourceFile> {
        names.iter().map(|name| SourceFile::new(*name)).collect()
    }

    fn names(list: &PhotoList) -> Vec<String> {
        list.photos()
            .iter()
            .map(|photo| photo.source().file_name())
            .collect()
    }

    #[test]
    fn removing_the_cover_promotes_the_next_photo() {
        let mut list = PhotoList::new(PreviewRegistry::new());
        list.add(files(&["a.jpg", "b.jpg", "c.jpg"]));

        assert!(list.remove(0));

        assert_eq!(names(&list), vec!["b.jpg", "c.jpg"]);
        assert_eq!(
            list.cover().map(|photo| photo.source().file_name()),
            Some("b.jpg".to_string())
        );
    }

    #[test]
    fn add_keeps_only_the_first_twenty_and_releases_the_rest() {
        let registry = PreviewRegistry::new();
        let mut list = PhotoList::new(registry.clone());
        let many: Vec<SourceFile> = (0..25)
            .map(|i| SourceFile::new(format!("p{i}.jpg")))
            .collect();

        let kept = list.add(many);

        assert_eq!(kept, MAX_PHOTOS);
        assert_eq!(list.len(), MAX_PHOTOS);
        assert_eq!(registry.minted(), 25);
        assert_eq!(registry.live_count(), MAX_PHOTOS);
        assert_eq!(names(&list).first().map(String::as_str), Some("p0.jpg"));

        assert_eq!(list.add(files(&["late.jpg"])), 0);
        assert_eq!(list.len(), MAX_PHOTOS);
    }

    #[test]
    fn drag_moves_a_single_element_and_follows_the_pointer() {
        let mut list = PhotoList::new(PreviewRegistry::new());
        list.add(files(&["a", "b", "c", "d"]));

        assert!(list.begin_drag(0));
        assert!(list.drag_over(2));
        assert_eq!(names(&list), vec!["b", "c", "a", "d"]);
        assert_eq!(list.dragged(), Some(2));

        assert!(!list.drag_over(2));
        assert_eq!(names(&list), vec!["b", "c", "a", "d"]);

        assert!(list.drag_over(3));
        assert_eq!(names(&list), vec!["b", "c", "d", "a"]);
        assert_eq!(list.end_drag(), Some(3));
        assert!(!list.drag_over(0));
    }

    #[test]
    fn drag_onto_itself_changes_nothing() {
        let registry = PreviewRegistry::new();
        let mut list = PhotoList::new(registry.clone());
        list.add(files(&["a", "b", "c"]));
        let before: Vec<u64> = list.photos().iter().map(|p| p.preview().id()).collect();

        list.begin_drag(1);
        assert!(!list.drag_over(1));

        let after: Vec<u64> = list.photos().iter().map(|p| p.preview().id()).collect();
        assert_eq!(before, after);
        assert_eq!(registry.live_count(), 3);
        assert_eq!(registry.minted(), 3);
    }

    #[test]
    fn removing_the_last_photo_sets_the_error_and_adding_clears_it() {
        let mut list = PhotoList::new(PreviewRegistry::new());
        list.add(files(&["a"]));
        assert!(!list.has_error());

        list.remove(0);
        assert!(list.has_error());

        list.add(files(&["b"]));
        assert!(!list.has_error());
    }

    #[test]
    fn validate_flags_an_empty_list() {
        let mut list = PhotoList::new(PreviewRegistry::new());
        assert!(!list.validate());
        assert!(list.has_error());
    }

    #[test]
    fn removing_below_the_dragged_photo_keeps_tracking_it() {
        let mut list = PhotoList::new(PreviewRegistry::new());
        list.add(files(&["a", "b", "c"]));
        list.begin_drag(2);
        list.remove(0);
        assert_eq!(list.dragged(), Some(1));
        list.remove(1);
        assert_eq!(list.dragged(), None);
    }

    #[test]
    fn every_handle_is_released_exactly_once() {
        let registry = PreviewRegistry::new();
        {
            let mut list = PhotoList::new(registry.clone());
            // Deterministic mix of operations.
            let mut seed: u64 = 7;
            let mut next = move || {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (seed >> 33) as usize
            };
            for round in 0..300 {
                match next() % 4 {
                    0 => {
                        let count = next() % 4 + 1;
                        let batch: Vec<SourceFile> = (0..count)
                            .map(|i| SourceFile::new(format!("r{round}_{i}.jpg")))
                            .collect();
                        list.add(batch);
                    }
                    1 if !list.is_empty() => {
                        list.remove(next() % list.len());
                    }
                    2 if !list.is_empty() => {
                        list.begin_drag(next() % list.len());
                        list.drag_over(next() % list.len());
                        list.end_drag();
                    }
                    _ => {}
                }
                assert!(list.len() <= MAX_PHOTOS);
                assert_eq!(registry.live_count(), list.len());
            }
        }
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.minted(), registry.released());
        assert_eq!(registry.double_releases(), 0);
    }

    #[test]
    fn resolve_files_expands_a_file_name_glob() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["b.JPG", "a.jpg", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").expect("write");
        }
        let pattern = format!("{}/*.jpg", dir.path().display());

        let found = resolve_files(&pattern).expect("matches");

        let names: Vec<String> = found.iter().map(SourceFile::file_name).collect();
        assert_eq!(names, vec!["a.jpg", "b.JPG"]);
    }

    #[test]
    fn resolve_files_lists_images_in_a_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["cover.png", "plan.pdf"] {
            fs::write(dir.path().join(name), b"x").expect("write");
        }

        let found = resolve_files(&dir.path().display().to_string()).expect("matches");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name(), "cover.png");
    }

    #[test]
    fn resolve_files_reports_missing_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pattern = format!("{}/*.png", dir.path().display());
        assert!(matches!(resolve_files(&pattern), Err(AppError::NoMatch(_))));
        assert!(matches!(
            resolve_files("/tmp/*/x.jpg"),
            Err(AppError::WildcardDirectory(_))
        ));
    }
}
