/// A full name broken into the parts the customer record stores.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonName {
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
}

/// Breaks a single full-name string into first/middle/last parts.
///
/// The first whitespace-separated token is the first name, the last token is the last name, and any interior tokens
/// become the middle name. A single token yields an empty last name; marketplace payloads occasionally carry
/// mononyms and the customer record tolerates the empty field.
pub fn break_name(full_name: &str) -> PersonName {
    let tokens = full_name.split_whitespace().collect::<Vec<_>>();
    match tokens.as_slice() {
        [] => PersonName::default(),
        [first] => PersonName { firstname: (*first).to_string(), ..Default::default() },
        [first, last] => {
            PersonName { firstname: (*first).to_string(), middlename: None, lastname: (*last).to_string() }
        },
        [first, middle @ .., last] => PersonName {
            firstname: (*first).to_string(),
            middlename: Some(middle.join(" ")),
            lastname: (*last).to_string(),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn two_tokens() {
        let name = break_name("Maria Santos");
        assert_eq!(name.firstname, "Maria");
        assert_eq!(name.middlename, None);
        assert_eq!(name.lastname, "Santos");
    }

    #[test]
    fn interior_tokens_become_the_middle_name() {
        let name = break_name("Maria da Silva Santos");
        assert_eq!(name.firstname, "Maria");
        assert_eq!(name.middlename.as_deref(), Some("da Silva"));
        assert_eq!(name.lastname, "Santos");
    }

    #[test]
    fn single_token() {
        let name = break_name("Madonna");
        assert_eq!(name.firstname, "Madonna");
        assert_eq!(name.middlename, None);
        assert_eq!(name.lastname, "");
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let name = break_name("  João   Pedro   Alves  ");
        assert_eq!(name.firstname, "João");
        assert_eq!(name.middlename.as_deref(), Some("Pedro"));
        assert_eq!(name.lastname, "Alves");
    }

    #[test]
    fn empty_input() {
        assert_eq!(break_name(""), PersonName::default());
    }
}
