//! Validation of what the user types into the category dialogs.
//!
//! Everything here runs before a request is made; the error text is what the
//! host shows in its blocking alert.

use thiserror::Error;

use crate::api::CategoryEdit;
use crate::models::CategoryTree;

pub const CATEGORY_SEPARATOR: &str = ">>";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryInputError {
    #[error("Too many '>>' in string")]
    TooManySeparators,
    #[error("Main category is empty")]
    EmptyMain,
    #[error("Sub category is empty")]
    EmptySub,
    #[error("The given database id is not a number!")]
    InvalidDatabaseId,
    #[error("Name is not allowed to be empty")]
    EmptyName,
    #[error("Cannot change parent of a category with existing sub categories")]
    ParentWithSubs,
}

/// A validated `main` or `main >> sub` choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub main: String,
    pub sub: Option<String>,
}

impl CategoryInput {
    /// `main` or `main >> sub`, the same form the options list uses.
    pub fn display(&self) -> String {
        match &self.sub {
            Some(sub) => format!("{} {CATEGORY_SEPARATOR} {sub}", self.main),
            None => self.main.clone(),
        }
    }
}

fn split_input(input: &str) -> Result<(&str, Option<&str>), CategoryInputError> {
    let mut parts = input.split(CATEGORY_SEPARATOR).map(str::trim);
    let main = parts.next().unwrap_or_default();
    let sub = parts.next();
    if parts.next().is_some() {
        return Err(CategoryInputError::TooManySeparators);
    }
    Ok((main, sub))
}

/// Strict parse used when saving a new tagged entry.
pub fn parse_category_input(input: &str) -> Result<CategoryInput, CategoryInputError> {
    let (main, sub) = split_input(input)?;
    if main.is_empty() {
        return Err(CategoryInputError::EmptyMain);
    }
    if sub.is_some_and(str::is_empty) {
        return Err(CategoryInputError::EmptySub);
    }
    Ok(CategoryInput {
        main: main.to_string(),
        sub: sub.map(str::to_string),
    })
}

/// Lenient parse used while typing: `(main, sub)` with a missing sub as `""`.
/// `None` when there is no main yet, so no statistics request is made.
pub fn statistics_query(input: &str) -> Result<Option<(String, String)>, CategoryInputError> {
    let (main, sub) = split_input(input)?;
    if main.is_empty() {
        return Ok(None);
    }
    Ok(Some((main.to_string(), sub.unwrap_or_default().to_string())))
}

/// Database ids are plain ASCII digit strings.
pub fn parse_database_id(text: &str) -> Result<i64, CategoryInputError> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(CategoryInputError::InvalidDatabaseId);
    }
    text.parse()
        .map_err(|_| CategoryInputError::InvalidDatabaseId)
}

/// Fields of the category edit form as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEditForm {
    pub id: String,
    pub name: String,
    pub url: String,
    pub parent_id: Option<String>,
}

impl CategoryEditForm {
    /// Check the form and build the request body. `has_subs` comes from
    /// `GET /category/{id}`; a main category with children cannot be given
    /// a parent.
    pub fn validate(&self, has_subs: bool) -> Result<CategoryEdit, CategoryInputError> {
        let id = self.id.trim();
        parse_database_id(id)?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryInputError::EmptyName);
        }

        let parent_id = match self.parent_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(parent) => {
                parse_database_id(parent)?;
                if has_subs {
                    return Err(CategoryInputError::ParentWithSubs);
                }
                Some(parent.to_string())
            }
        };

        Ok(CategoryEdit {
            id: id.to_string(),
            name: name.to_string(),
            url: self.url.trim().to_string(),
            parent_id,
        })
    }
}

/// Dialog options in server order: each main, then `main >> child` for its
/// children.
pub fn category_options(trees: &[CategoryTree]) -> Vec<String> {
    trees
        .iter()
        .flat_map(|tree| {
            std::iter::once(tree.main.name.clone()).chain(tree.children.iter().map(|child| {
                format!("{} {CATEGORY_SEPARATOR} {}", tree.main.name, child.name)
            }))
        })
        .collect()
}

/// Options whose text contains `input`, ignoring case.
pub fn filter_options<'a>(options: &'a [String], input: &str) -> Vec<&'a str> {
    let needle = input.to_lowercase();
    options
        .iter()
        .filter(|option| option.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}
