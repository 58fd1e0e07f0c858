use crate::model::{NewsPostDraft, NewsPostPatch};

const EXCERPT_CHARS: usize = 100;

/// First 100 characters of the content followed by `...`
///
/// Empty content yields an empty excerpt.
pub fn derive_excerpt(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let head: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head)
}

/// Fill a blank draft excerpt from the content
pub fn prepare_draft(mut draft: NewsPostDraft) -> NewsPostDraft {
    if draft.excerpt.trim().is_empty() {
        draft.excerpt = derive_excerpt(&draft.content);
    }
    draft
}

/// Re-derive the excerpt when the content changes and no excerpt is given
pub fn prepare_patch(mut patch: NewsPostPatch) -> NewsPostPatch {
    let blank_excerpt = patch
        .excerpt
        .as_deref()
        .map_or(true, |excerpt| excerpt.trim().is_empty());
    if blank_excerpt {
        if let Some(content) = &patch.content {
            patch.excerpt = Some(derive_excerpt(content));
        }
    }
    patch
}
