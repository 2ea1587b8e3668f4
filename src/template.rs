/// Placeholder token replaced by [`condition`].
pub const CONDITION_PLACEHOLDER: &str = "/*condition*/";

/// Replace every `/*condition*/` token in `query` with `condition`.
///
/// Plain text substitution: the condition is neither parsed nor escaped, so it
/// must never contain untrusted input.
///
/// ```
/// assert_eq!(
///    easydb::condition("SELECT * FROM t /*condition*/", "WHERE id=1"),
///    "SELECT * FROM t WHERE id=1"
/// );
/// ```
pub fn condition(query: &str, condition: &str) -> String {
   query.replace(CONDITION_PLACEHOLDER, condition)
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_replaces_placeholder() {
      assert_eq!(
         condition("SELECT * FROM t /*condition*/", "WHERE id=1"),
         "SELECT * FROM t WHERE id=1"
      );
   }

   #[test]
   fn test_without_placeholder_is_unchanged() {
      let query = "SELECT * FROM t WHERE id = ?";
      assert_eq!(condition(query, "WHERE id=1"), query);
   }

   #[test]
   fn test_replaces_every_occurrence() {
      assert_eq!(
         condition(
            "SELECT a FROM x /*condition*/ UNION SELECT a FROM y /*condition*/",
            "WHERE a > 0"
         ),
         "SELECT a FROM x WHERE a > 0 UNION SELECT a FROM y WHERE a > 0"
      );
   }

   #[test]
   fn test_empty_condition_removes_token() {
      assert_eq!(condition("SELECT 1 /*condition*/", ""), "SELECT 1 ");
   }

   #[test]
   fn test_similar_comments_are_left_alone() {
      let query = "SELECT 1 /* condition */ /*CONDITION*/";
      assert_eq!(condition(query, "WHERE 1=1"), query);
   }
}
