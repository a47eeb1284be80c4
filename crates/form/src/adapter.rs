use platter_schema::{ErrorState, RowErrors};

/// Read-only routing of computed validation errors to rows and fields.
///
/// Tolerates error states shorter than the row list: rows past the end, such as
/// freshly appended ones, simply have no error.
#[derive(Clone, Copy, Debug)]
pub struct ErrorView<'a> {
	errors: &'a ErrorState,
}

impl<'a> ErrorView<'a> {
	pub fn new(errors: &'a ErrorState) -> Self {
		Self { errors }
	}

	pub fn error_for(&self, index: usize, field: &str) -> Option<&'a str> {
		self.errors.get(index)?.get(field)
	}

	/// Messages for one row, or `None` when the row is clean.
	pub fn row_errors(&self, index: usize) -> Option<&'a RowErrors> {
		self.errors.get(index).filter(|errors| !errors.is_empty())
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_clean()
	}
}
