use std::cmp::Ordering;

use crate::models::User;

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive ordering for sorting names.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a price the way the menu shows it: `$12.50`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Dashboard user search: matches name, email or role name.
/// A blank term returns every user.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let term = term.trim();
    users
        .iter()
        .filter(|user| {
            term.is_empty()
                || contains_ignore_case(&user.name, term)
                || contains_ignore_case(&user.email, term)
                || contains_ignore_case(&user.role.name, term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn user(name: &str, email: &str, role: &str) -> User {
        User {
            id: 1,
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole {
                id: None,
                name: role.to_string(),
            },
            is_active: true,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hola", 10), "Hola");
        assert_eq!(truncate("Hamburguesa doble", 8), "Hambu...");
        assert_eq!(truncate("Sí", 2), "Sí");
        assert_eq!(truncate("Piñata", 3), "Piñ");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_cmp_ignore_case() {
        let mut names = vec!["bebidas", "Postres", "Entradas"];
        names.sort_by(|a, b| cmp_ignore_case(a, b));
        assert_eq!(names, vec!["bebidas", "Entradas", "Postres"]);
    }

    #[test]
    fn test_filter_users() {
        let users = vec![
            user("Ana Pérez", "ana@pp.com", "ADMIN"),
            user("Luis", "luis@pp.com", "MESERO"),
        ];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "ANA")[0].name, "Ana Pérez");
        assert_eq!(filter_users(&users, "mesero")[0].name, "Luis");
        assert_eq!(filter_users(&users, "@pp.com").len(), 2);
        assert!(filter_users(&users, "cocina").is_empty());
    }
}
