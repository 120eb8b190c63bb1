use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive a URL-safe slug from free text.
///
/// Diacritics are stripped via NFD decomposition, everything outside
/// `[a-z0-9\s-]` is dropped, whitespace runs become one hyphen and repeated
/// hyphens collapse.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if pending_space {
            push_hyphen(&mut slug);
            pending_space = false;
        }
        if c == '-' {
            push_hyphen(&mut slug);
        } else {
            slug.push(c);
        }
    }
    if pending_space {
        push_hyphen(&mut slug);
    }
    slug
}

fn push_hyphen(slug: &mut String) {
    if !slug.ends_with('-') {
        slug.push('-');
    }
}

/// Whether `slug` only contains `[a-z0-9-]` and is non-empty.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Title and slug inputs of one editing session.
///
/// While creating, the slug follows the title until the slug is edited by
/// hand; from then on it is left alone for the rest of the session. Editing
/// an existing entry never re-derives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugField {
    title: String,
    slug: String,
    manual: bool,
}

impl SlugField {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            manual: true,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if !self.manual {
            self.slug = slugify(&self.title);
        }
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
        self.manual = true;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }
}
