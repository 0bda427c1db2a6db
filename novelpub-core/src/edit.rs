//! Post-parse chapter corrections.
//!
//! Every edit takes the current chapter list and returns a new one, leaving
//! the input untouched. An id that matches nothing is not an error: the
//! returned list is simply equal to the input.

use crate::types::{Chapter, ChapterId};

/// Replace the title of the chapter with the given id
pub fn rename(chapters: &[Chapter], id: &ChapterId, new_title: impl Into<String>) -> Vec<Chapter> {
    let new_title = new_title.into();
    chapters
        .iter()
        .map(|chapter| {
            if &chapter.id == id {
                Chapter {
                    title: new_title.clone(),
                    ..chapter.clone()
                }
            } else {
                chapter.clone()
            }
        })
        .collect()
}

/// Fold the chapter with the given id into its predecessor.
///
/// The merged chapter keeps the predecessor's id and title, its lines come
/// first, and it counts as an intro if either part was one. The first chapter
/// has nothing to merge into and is left alone.
pub fn merge_with_previous(chapters: &[Chapter], id: &ChapterId) -> Vec<Chapter> {
    let index = match chapters.iter().position(|chapter| &chapter.id == id) {
        Some(index) if index > 0 => index,
        _ => return chapters.to_vec(),
    };

    let previous = &chapters[index - 1];
    let current = &chapters[index];

    let mut lines = Vec::with_capacity(previous.lines.len() + current.lines.len());
    lines.extend_from_slice(&previous.lines);
    lines.extend_from_slice(&current.lines);

    let merged = Chapter {
        id: previous.id.clone(),
        title: previous.title.clone(),
        lines,
        is_intro: previous.is_intro || current.is_intro,
    };

    let mut result = Vec::with_capacity(chapters.len() - 1);
    result.extend_from_slice(&chapters[..index - 1]);
    result.push(merged);
    result.extend_from_slice(&chapters[index + 1..]);
    result
}
