//! [`User`]s list definitions: searching, filtering and ordering of the
//! canonical collection.

use std::cmp::Ordering;

use common::{define_kind, pagination};
use derive_more::{AsRef, Display, From};

use crate::domain::{user, User};

pub use common::pagination::Order;

/// Free-text search over multiple [`User`] fields.
///
/// Empty (or blank) [`Search`] matches every [`User`].
#[derive(AsRef, Clone, Debug, Default, Display, Eq, From, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Search(String);

impl Search {
    /// Checks whether the provided [`User`] matches this [`Search`].
    ///
    /// [`user::Id`] is matched as decimal text, while the other fields are
    /// matched case-insensitively.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let query = self.0.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        user.id.to_string().contains(&query)
            || contains(&user.first_name, &query)
            || contains(&user.last_name, &query)
            || contains(&user.email, &query)
            || contains(&user.department, &query)
    }
}

/// Per-field filter of [`User`]s.
///
/// An empty field imposes no constraint.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// Part of a [`User`]'s first name to look for.
    pub first_name: String,

    /// Part of a [`User`]'s last name to look for.
    pub last_name: String,

    /// Part of a [`User`]'s email to look for.
    pub email: String,

    /// Part of a [`User`]'s department to look for.
    pub department: String,
}

impl Filter {
    /// Indicates whether this [`Filter`] imposes no constraint at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.email.is_empty()
            && self.department.is_empty()
    }

    /// Checks whether the provided [`User`] satisfies every non-empty field of
    /// this [`Filter`].
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        [
            (&self.first_name, user.first_name.as_ref()),
            (&self.last_name, user.last_name.as_ref()),
            (&self.email, user.email.as_ref()),
            (&self.department, user.department.as_ref()),
        ]
        .into_iter()
        .all(|(expected, actual)| {
            expected.is_empty() || contains(actual, &expected.to_lowercase())
        })
    }
}

/// Checks whether the provided [`User`] matches both the [`Search`] and the
/// [`Filter`].
#[must_use]
pub fn matches(user: &User, search: &Search, filter: &Filter) -> bool {
    search.matches(user) && filter.matches(user)
}

/// Case-insensitive substring check, expecting an already lowercased `needle`.
fn contains(haystack: impl AsRef<str>, needle: &str) -> bool {
    haystack.as_ref().to_lowercase().contains(needle)
}

define_kind! {
    #[doc = "Field to order [`User`]s by."]
    enum Key {
        #[doc = "[`user::Id`]."]
        Id = 1,

        #[doc = "First name."]
        FirstName = 2,

        #[doc = "Last name."]
        LastName = 3,

        #[doc = "Email."]
        Email = 4,

        #[doc = "Department."]
        Department = 5,
    }
}

define_kind! {
    #[doc = "Number of [`User`]s on a single page."]
    enum PageSize {
        #[doc = "10 [`User`]s."]
        #[strum(serialize = "10")]
        Ten = 10,

        #[doc = "25 [`User`]s."]
        #[strum(serialize = "25")]
        TwentyFive = 25,

        #[doc = "50 [`User`]s."]
        #[strum(serialize = "50")]
        Fifty = 50,

        #[doc = "100 [`User`]s."]
        #[strum(serialize = "100")]
        Hundred = 100,
    }
}

impl PageSize {
    /// Returns the number of [`User`]s on a page of this [`PageSize`].
    #[must_use]
    pub fn get(self) -> usize {
        usize::from(self.u8())
    }
}

/// Ordering of [`User`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sort {
    /// [`Key`] to order by.
    pub key: Key,

    /// [`Order`] of the [`Key`] values.
    pub order: Order,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            key: Key::Id,
            order: Order::Ascending,
        }
    }
}

impl Sort {
    /// Selects the provided [`Key`]: the active one flips its [`Order`], while
    /// another one becomes active in [`Order::Ascending`].
    pub fn toggle(&mut self, key: Key) {
        if self.key == key {
            self.order = self.order.reversed();
        } else {
            *self = Self {
                key,
                order: Order::Ascending,
            };
        }
    }

    /// Compares the provided [`User`]s according to this [`Sort`].
    ///
    /// [`user::Id`]s are compared numerically, the other fields as
    /// case-sensitive text.
    #[must_use]
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        let ordering = match self.key {
            Key::Id => a.id.cmp(&b.id),
            Key::FirstName => a.first_name.cmp(&b.first_name),
            Key::LastName => a.last_name.cmp(&b.last_name),
            Key::Email => a.email.cmp(&b.email),
            Key::Department => a.department.cmp(&b.department),
        };
        self.order.apply(ordering)
    }

    /// Orders the provided [`User`]s according to this [`Sort`], keeping the
    /// relative order of equal ones.
    pub fn order(&self, users: &mut [&User]) {
        users.sort_by(|a, b| self.compare(a, b));
    }
}

/// Selects the [`User`]s matching the [`Search`] and the [`Filter`], ordered
/// according to the [`Sort`].
#[must_use]
pub fn select<'u>(
    users: &'u [User],
    search: &Search,
    filter: &Filter,
    sort: Sort,
) -> Vec<&'u User> {
    let mut selected = users
        .iter()
        .filter(|u| matches(u, search, filter))
        .collect::<Vec<_>>();
    sort.order(&mut selected);
    selected
}

/// Rendered part of the [`User`]s list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct View {
    /// [`User`]s to be rendered, in order.
    pub rows: Vec<User>,

    /// Active [`Sort`].
    pub sort: Sort,

    /// Position of the [`View::rows`] in the whole selection.
    pub window: pagination::Info,
}

impl View {
    /// Returns the total number of [`User`]s matching the current search and
    /// filter.
    #[must_use]
    pub fn total(&self) -> usize {
        match self.window {
            pagination::Info::Paged(info) => info.total,
            pagination::Info::Growing(info) => info.total,
        }
    }

    /// Returns IDs of the rendered [`User`]s, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<user::Id> {
        self.rows.iter().map(|u| u.id).collect()
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        user::{Fields, Id},
        User,
    };

    use super::{matches, select, Filter, Key, Order, Search, Sort};

    fn user(id: u64, first: &str, last: &str, email: &str, dep: &str) -> User {
        User::new(
            Id::from(id),
            Fields {
                first_name: first.into(),
                last_name: last.into(),
                email: email.into(),
                department: dep.into(),
            },
        )
    }

    fn users() -> Vec<User> {
        vec![
            user(3, "Clementine", "Bauch", "Nathan@yesenia.net", "Romaguera"),
            user(1, "Leanne", "Graham", "Sincere@april.biz", "Romaguera"),
            user(12, "Ervin", "Howell", "Shanna@melissa.tv", "Deckow"),
            user(2, "ervin", "Bauch", "", "General"),
        ]
    }

    fn ids(users: &[&User]) -> Vec<u64> {
        users.iter().map(|u| u.id.into()).collect()
    }

    #[test]
    fn empty_search_matches_all() {
        for u in users() {
            assert!(Search::default().matches(&u));
            assert!(Search::from("   ").matches(&u));
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let found = users()
            .into_iter()
            .filter(|u| Search::from("ERVIN").matches(u))
            .map(|u| u64::from(u.id))
            .collect::<Vec<_>>();
        assert_eq!(found, [12, 2]);

        let u = user(5, "Ann", "Lee", "ann@Example.com", "Eng");
        assert!(Search::from("example").matches(&u));
        assert!(Search::from(" eng ").matches(&u));
        assert!(!Search::from("bob").matches(&u));
    }

    #[test]
    fn search_matches_id_as_text() {
        let u = user(123, "", "", "", "General");
        assert!(Search::from("12").matches(&u));
        assert!(Search::from("23").matches(&u));
        assert!(!Search::from("124").matches(&u));
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let users = users();
        let kept = users
            .iter()
            .filter(|u| Filter::default().matches(u))
            .count();
        assert!(Filter::default().is_empty());
        assert_eq!(kept, users.len());
    }

    #[test]
    fn filter_is_a_conjunction() {
        let filter = Filter {
            last_name: "bauch".into(),
            department: "ROMA".into(),
            ..Filter::default()
        };
        assert!(!filter.is_empty());

        let found = users()
            .into_iter()
            .filter(|u| filter.matches(u))
            .map(|u| u64::from(u.id))
            .collect::<Vec<_>>();
        assert_eq!(found, [3]);
    }

    #[test]
    fn search_and_filter_are_both_required() {
        let u = user(1, "Leanne", "Graham", "Sincere@april.biz", "Romaguera");
        let filter = Filter {
            email: "april".into(),
            ..Filter::default()
        };

        assert!(matches(&u, &"leanne".into(), &filter));
        assert!(!matches(&u, &"ervin".into(), &filter));
        assert!(!matches(
            &u,
            &"leanne".into(),
            &Filter {
                email: "melissa".into(),
                ..Filter::default()
            },
        ));
    }

    #[test]
    fn orders_ids_numerically() {
        let users = users();
        let sort = Sort::default();

        let selected =
            select(&users, &Search::default(), &Filter::default(), sort);
        assert_eq!(ids(&selected), [1, 2, 3, 12]);
    }

    #[test]
    fn orders_text_case_sensitively() {
        let users = users();
        let sort = Sort {
            key: Key::FirstName,
            order: Order::Ascending,
        };

        let selected =
            select(&users, &Search::default(), &Filter::default(), sort);
        assert_eq!(ids(&selected), [3, 12, 1, 2]);
    }

    #[test]
    fn keeps_equal_keys_in_input_order() {
        let users = users();
        for order in [Order::Ascending, Order::Descending] {
            let sort = Sort {
                key: Key::LastName,
                order,
            };
            let selected =
                select(&users, &Search::default(), &Filter::default(), sort);
            let bauchs = selected
                .iter()
                .filter(|u| u.last_name.as_ref() == "Bauch")
                .map(|u| u64::from(u.id))
                .collect::<Vec<_>>();
            assert_eq!(bauchs, [3, 2], "{order:?}");
        }
    }

    #[test]
    fn descending_reverses_distinct_keys() {
        let users = users();
        let asc = Sort {
            key: Key::Email,
            order: Order::Ascending,
        };
        let desc = Sort {
            key: Key::Email,
            order: Order::Descending,
        };

        let mut ascending = ids(&select(
            &users,
            &Search::default(),
            &Filter::default(),
            asc,
        ));
        let descending =
            ids(&select(&users, &Search::default(), &Filter::default(), desc));
        ascending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn ordering_is_idempotent() {
        let users = users();
        let sort = Sort {
            key: Key::Department,
            order: Order::Descending,
        };

        let once =
            select(&users, &Search::default(), &Filter::default(), sort);
        let mut twice = once.clone();
        sort.order(&mut twice);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn toggles_sort() {
        let mut sort = Sort::default();

        sort.toggle(Key::Id);
        assert_eq!(
            sort,
            Sort {
                key: Key::Id,
                order: Order::Descending,
            },
        );

        sort.toggle(Key::Email);
        assert_eq!(
            sort,
            Sort {
                key: Key::Email,
                order: Order::Ascending,
            },
        );
    }

    #[test]
    fn page_size_options() {
        use strum::IntoEnumIterator as _;

        use super::PageSize;

        assert_eq!(
            PageSize::iter().map(PageSize::get).collect::<Vec<_>>(),
            [10, 25, 50, 100],
        );
        assert_eq!("25".parse::<PageSize>(), Ok(PageSize::TwentyFive));
        assert_eq!(PageSize::try_from(50), Ok(PageSize::Fifty));
        assert_eq!(PageSize::try_from(20), Err(20));
    }

    #[test]
    fn key_is_parsed_from_text() {
        assert_eq!("first_name".parse::<Key>(), Ok(Key::FirstName));
        assert_eq!(Key::Department.to_string(), "department");
        assert!("actions".parse::<Key>().is_err());
    }
}
