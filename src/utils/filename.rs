//! Unique filename generation for stored images.
//!
//! Two schemes are in use: book covers keep a sanitized version of the
//! original name for readability, standalone uploads use a millisecond
//! timestamp. Both append a random alphanumeric suffix so concurrent
//! uploads of the same file never collide.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;

const SUFFIX_LEN: usize = 6;

/// Generates a cover filename of the form `sanitized-stem-Ab12Cd.ext`.
///
/// The stem is lowercased and every run of non-alphanumeric characters
/// collapses to a single `-`. An unusable original name falls back to
/// `"file"`.
pub fn cover_filename(original: &str) -> String {
    let (stem, ext) = split_name(original);
    let mut safe = String::with_capacity(stem.len());
    let mut last_dash = true;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            safe.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            safe.push('-');
            last_dash = true;
        }
    }
    let safe = safe.trim_matches('-');
    let stem = if safe.is_empty() { "file" } else { safe };
    join_name(stem, &random_suffix(), ext)
}

/// Generates an upload filename of the form `1724112000000-Ab12Cd.ext`.
pub fn upload_filename(original: &str) -> String {
    let (_, ext) = split_name(original);
    join_name(
        &Utc::now().timestamp_millis().to_string(),
        &random_suffix(),
        ext,
    )
}

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}

/// Splits a filename into stem and lowercased extension. Extensions must
/// be purely alphanumeric; anything else stays part of the stem.
fn split_name(original: &str) -> (&str, Option<String>) {
    match original.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (stem, Some(ext.to_lowercase()))
        }
        _ => (original, None),
    }
}

fn join_name(stem: &str, suffix: &str, ext: Option<String>) -> String {
    match ext {
        Some(ext) => format!("{stem}-{suffix}.{ext}"),
        None => format!("{stem}-{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cover_filename_sanitizes_stem() {
        let name = cover_filename("My Favorite Book!.PNG");
        assert!(name.starts_with("my-favorite-book-"), "got {name}");
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn cover_filename_collapses_symbol_runs() {
        let name = cover_filename("a___b...c.jpg");
        assert!(name.starts_with("a-b-c-"), "got {name}");
    }

    #[test]
    fn cover_filename_falls_back_for_unusable_stem() {
        let name = cover_filename("___.jpg");
        assert!(name.starts_with("file-"), "got {name}");
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn cover_filename_without_extension() {
        let name = cover_filename("README");
        assert!(name.starts_with("readme-"), "got {name}");
        assert!(!name.contains('.'));
    }

    #[test]
    fn upload_filename_uses_timestamp_and_suffix() {
        let name = upload_filename("photo.JPEG");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "jpeg");
        let (millis, suffix) = stem.rsplit_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 6);
    }

    #[test]
    fn generated_names_are_unique() {
        let a = cover_filename("same.png");
        let b = cover_filename("same.png");
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn cover_filename_never_contains_path_separators(original in ".{0,64}") {
            let name = cover_filename(&original);
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(!name.contains(".."));
            prop_assert!(!name.is_empty());
        }
    }
}
