//! Naming helpers for code generation
//!
//! Inflection and case conversion used to derive class names, routes, view
//! folders and titles from a table name.

use inflector::Inflector;
use std::fmt;

/// Naming helpers shared by the artifact builders
pub struct NamingHelpers;

impl NamingHelpers {
    /// Convert string to `snake_case`
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to `StudlyCase`
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::to_studly_case("blog_post"), "BlogPost");
    /// ```
    #[must_use]
    pub fn to_studly_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Convert string to kebab-case
    #[must_use]
    pub fn to_kebab_case(input: &str) -> String {
        input.to_kebab_case()
    }

    /// Pluralize a word
    ///
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular plurals.
    /// This is acceptable for code generation as table names are typically regular words.
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Singularize the last word of a `snake_case` name
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::singularize_last("blog_posts"), "blog_post");
    /// assert_eq!(NamingHelpers::singularize_last("categories"), "category");
    /// ```
    #[must_use]
    pub fn singularize_last(input: &str) -> String {
        match input.rsplit_once('_') {
            Some((head, last)) => format!("{head}_{}", last.to_singular()),
            None => input.to_singular(),
        }
    }

    /// Human-readable title from a class name (`BlogPost` → `Blog Post`)
    #[must_use]
    pub fn to_title(name: &str) -> String {
        name.to_title_case()
    }

    /// Human-readable plural title (`BlogPost` → `Blog Posts`)
    #[must_use]
    pub fn to_plural_title(name: &str) -> String {
        Self::pluralize(&Self::to_title(name))
    }

    /// Eloquent relation method name for a referenced table (`blog_posts` → `blogPost`)
    #[must_use]
    pub fn to_relation_name(table: &str) -> String {
        Self::to_camel_case(&Self::singularize_last(table))
    }

    /// Turn a PHP namespace into a relative directory below the app directory
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::namespace_dir("App\\Http\\Controllers"), "Http/Controllers");
    /// assert_eq!(NamingHelpers::namespace_dir("App"), "");
    /// ```
    #[must_use]
    pub fn namespace_dir(namespace: &str) -> String {
        namespace
            .trim_matches('\\')
            .split('\\')
            .skip(1)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Singular, `StudlyCase` class name derived from a table name
///
/// Used consistently for file names, class names and route segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    /// Derive the class name for a table (`blog_posts` → `BlogPost`)
    ///
    /// ```
    /// # use crudgen::naming::ClassName;
    /// assert_eq!(ClassName::from_table("blog_posts").as_str(), "BlogPost");
    /// assert_eq!(ClassName::from_table("products").as_str(), "Product");
    /// ```
    #[must_use]
    pub fn from_table(table: &str) -> Self {
        let snake = NamingHelpers::to_snake_case(table);
        Self(NamingHelpers::to_studly_case(&NamingHelpers::singularize_last(
            &snake,
        )))
    }

    /// The class name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `BlogPosts`
    #[must_use]
    pub fn plural(&self) -> String {
        NamingHelpers::pluralize(&self.0)
    }

    /// `blogPost`
    #[must_use]
    pub fn camel(&self) -> String {
        NamingHelpers::to_camel_case(&self.0)
    }

    /// `blogPosts`
    #[must_use]
    pub fn camel_plural(&self) -> String {
        NamingHelpers::to_camel_case(&self.plural())
    }

    /// `blog-post`, used as the view folder
    #[must_use]
    pub fn kebab(&self) -> String {
        NamingHelpers::to_kebab_case(&self.0)
    }

    /// `blog-posts`, the default route name
    #[must_use]
    pub fn kebab_plural(&self) -> String {
        NamingHelpers::to_kebab_case(&self.plural())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_from_table() {
        assert_eq!(ClassName::from_table("blog_posts").as_str(), "BlogPost");
        assert_eq!(ClassName::from_table("products").as_str(), "Product");
        assert_eq!(ClassName::from_table("categories").as_str(), "Category");
        assert_eq!(ClassName::from_table("user_profiles").as_str(), "UserProfile");
    }

    #[test]
    fn test_class_name_forms() {
        let name = ClassName::from_table("blog_posts");
        assert_eq!(name.plural(), "BlogPosts");
        assert_eq!(name.camel(), "blogPost");
        assert_eq!(name.camel_plural(), "blogPosts");
        assert_eq!(name.kebab(), "blog-post");
        assert_eq!(name.kebab_plural(), "blog-posts");
        assert_eq!(name.to_string(), "BlogPost");
    }

    #[test]
    fn test_titles() {
        assert_eq!(NamingHelpers::to_title("Product"), "Product");
        assert_eq!(NamingHelpers::to_title("BlogPost"), "Blog Post");
        assert_eq!(NamingHelpers::to_plural_title("BlogPost"), "Blog Posts");
    }

    #[test]
    fn test_relation_name() {
        assert_eq!(NamingHelpers::to_relation_name("users"), "user");
        assert_eq!(NamingHelpers::to_relation_name("blog_posts"), "blogPost");
    }

    #[test]
    fn test_namespace_dir() {
        assert_eq!(NamingHelpers::namespace_dir("App\\Models"), "Models");
        assert_eq!(NamingHelpers::namespace_dir("\\App\\Http\\Controllers\\"), "Http/Controllers");
    }
}
