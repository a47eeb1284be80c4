use platter_schema::{FieldKind, ForeignKeyConfig};

/// Relation name of the restaurants entity set.
pub const RESTAURANTS: &str = "restaurants";

/// Relation name of the users entity set.
pub const USERS: &str = "users";

/// Parent record a collection is nested under.
///
/// Rows never carry a key back to their parent; the foreign key they do carry
/// points at the other side of the relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parent {
	User,
	Restaurant,
}

impl Parent {
	/// Foreign-key column, label, and kind for the non-parent side of a row.
	pub(crate) fn counterpart(self, user_column: &'static str) -> (&'static str, &'static str, FieldKind) {
		match self {
			Self::User => ("restaurant_id", RESTAURANTS, restaurants_fk()),
			Self::Restaurant => (user_column, USERS, users_fk()),
		}
	}
}

pub(crate) fn restaurants_fk() -> FieldKind {
	FieldKind::ForeignKey(ForeignKeyConfig::new(RESTAURANTS, "Select Restaurants").with_display_fields(["name"]))
}

pub(crate) fn users_fk() -> FieldKind {
	FieldKind::ForeignKey(ForeignKeyConfig::new(USERS, "Select Users").with_display_fields(["name", "email"]))
}
