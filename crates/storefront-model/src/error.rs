//! Validation errors for form input

/// Form field that can carry an invalid-input marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Store floor area
    FloorArea,
    /// Store contact email
    Email,
    /// Product price
    Price,
    /// Product star rating
    Rating,
    /// Product status selector
    Status,
}

impl FormField {
    /// Every markable field, store form first
    pub const ALL: [FormField; 5] = [
        Self::FloorArea,
        Self::Email,
        Self::Price,
        Self::Rating,
        Self::Status,
    ];

    /// Class hook of the input element for this field
    #[inline]
    #[must_use]
    pub fn input_class(self) -> &'static str {
        match self {
            Self::FloorArea => "modal-store-floorArea-inp",
            Self::Email => "modal-store-email-inp",
            Self::Price => "modal-detail-price-inp",
            Self::Rating => "modal-detail-rating-inp",
            Self::Status => "modal-status-product",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FloorArea => "FloorArea",
            Self::Email => "Email",
            Self::Price => "Price",
            Self::Rating => "Rating",
            Self::Status => "Status",
        };
        f.write_str(name)
    }
}

/// A single rejected value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field value failed its rule
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: FormField, value: String },

    /// Status text is not one of OK, STORAGE, OUT_OF_STOCK
    #[error("unknown product status: {0:?}")]
    UnknownStatus(String),
}

impl ValidationError {
    /// Field the error belongs to, if it is field-bound
    #[inline]
    #[must_use]
    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::InvalidField { field, .. } => Some(*field),
            Self::UnknownStatus(_) => Some(FormField::Status),
        }
    }
}

/// Every failure found while validating one form submission
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{} invalid field(s): {}", .errors.len(), field_list(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create empty error set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    #[inline]
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// No failures recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields that failed, in submission order
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        self.errors.iter().filter_map(ValidationError::field).collect()
    }

    /// `Ok(value)` when nothing failed
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn field_list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .filter_map(ValidationError::field)
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
