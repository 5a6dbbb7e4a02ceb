//! Address entry models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Field name parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("Unknown address field: {0}")]
    UnknownField(String),
}

/// One input of the address form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    DoctorName,
    HospitalClinic,
    FlatNo,
    Society,
    Area,
    City,
    Pincode,
    Mobile,
}

impl AddressField {
    /// Every field, in the order the form renders them.
    pub const ALL: [AddressField; 8] = [
        AddressField::DoctorName,
        AddressField::HospitalClinic,
        AddressField::FlatNo,
        AddressField::Society,
        AddressField::Area,
        AddressField::City,
        AddressField::Pincode,
        AddressField::Mobile,
    ];

    /// Wire name (camelCase), as used by the rendering layer.
    pub fn name(self) -> &'static str {
        match self {
            AddressField::DoctorName => "doctorName",
            AddressField::HospitalClinic => "hospitalClinic",
            AddressField::FlatNo => "flatNo",
            AddressField::Society => "society",
            AddressField::Area => "area",
            AddressField::City => "city",
            AddressField::Pincode => "pincode",
            AddressField::Mobile => "mobile",
        }
    }

    /// Human-readable label shown above the input.
    pub fn label(self) -> &'static str {
        match self {
            AddressField::DoctorName => "Doctor's Name",
            AddressField::HospitalClinic => "Hospital/Clinic",
            AddressField::FlatNo => "Flat No./Survey Number",
            AddressField::Society => "Society/Colony",
            AddressField::Area => "Lane/Area",
            AddressField::City => "City",
            AddressField::Pincode => "Pincode",
            AddressField::Mobile => "Mobile Number",
        }
    }

    /// Sample value shown in an empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            AddressField::DoctorName => "Dr. John Doe",
            AddressField::HospitalClinic => "City Hospital",
            AddressField::FlatNo => "101",
            AddressField::Society => "Green Valley",
            AddressField::Area => "West Street",
            AddressField::City => "Mumbai",
            AddressField::Pincode => "400001",
            AddressField::Mobile => "9876543210",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddressField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldParseError::UnknownField(s.to_string()))
    }
}

/// One postal address record under construction.
///
/// Values are stored as entered, valid or not. Validation is advisory and
/// lives in [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
    pub doctor_name: String,
    pub hospital_clinic: String,
    pub flat_no: String,
    pub society: String,
    pub area: String,
    pub city: String,
    pub pincode: String,
    /// Empty, or exactly 10 decimal digits once valid
    pub mobile: String,
}

impl AddressEntry {
    /// Create an entry with every field empty.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Get the value of a field.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::DoctorName => &self.doctor_name,
            AddressField::HospitalClinic => &self.hospital_clinic,
            AddressField::FlatNo => &self.flat_no,
            AddressField::Society => &self.society,
            AddressField::Area => &self.area,
            AddressField::City => &self.city,
            AddressField::Pincode => &self.pincode,
            AddressField::Mobile => &self.mobile,
        }
    }

    /// Return a copy of this entry with one field replaced.
    pub fn with_field(&self, field: AddressField, value: impl Into<String>) -> Self {
        let mut entry = self.clone();
        *entry.field_mut(field) = value.into();
        entry
    }

    /// Check if every field is empty.
    pub fn is_blank(&self) -> bool {
        AddressField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Check if this entry has enough content to show in the formatted list.
    pub fn is_displayable(&self) -> bool {
        !self.doctor_name.is_empty() || !self.mobile.is_empty() || !self.city.is_empty()
    }

    fn field_mut(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::DoctorName => &mut self.doctor_name,
            AddressField::HospitalClinic => &mut self.hospital_clinic,
            AddressField::FlatNo => &mut self.flat_no,
            AddressField::Society => &mut self.society,
            AddressField::Area => &mut self.area,
            AddressField::City => &mut self.city,
            AddressField::Pincode => &mut self.pincode,
            AddressField::Mobile => &mut self.mobile,
        }
    }
}

/// Synthetic stable id for a collection slot.
///
/// Entries carry no identity of their own; the id survives index shifts
/// caused by removals and is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_entry() {
        let entry = AddressEntry::blank();
        assert!(entry.is_blank());
        assert!(!entry.is_displayable());
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let entry = AddressEntry::blank();
        let edited = entry.with_field(AddressField::City, "Pune");

        assert_eq!(edited.city, "Pune");
        assert_eq!(edited.get(AddressField::City), "Pune");
        assert!(entry.city.is_empty());
    }

    #[test]
    fn test_displayable_fields() {
        let base = AddressEntry::blank();
        assert!(base.with_field(AddressField::DoctorName, "Dr. Rao").is_displayable());
        assert!(base.with_field(AddressField::Mobile, "98").is_displayable());
        assert!(base.with_field(AddressField::City, "Pune").is_displayable());

        // Other fields alone don't trigger the formatted list
        let entry = base.with_field(AddressField::Pincode, "411001");
        assert!(!entry.is_blank());
        assert!(!entry.is_displayable());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in AddressField::ALL {
            assert_eq!(field.name().parse::<AddressField>(), Ok(field));
        }
        assert_eq!(
            "phone".parse::<AddressField>(),
            Err(FieldParseError::UnknownField("phone".into()))
        );
    }

    #[test]
    fn test_labels_and_placeholders() {
        assert_eq!(AddressField::FlatNo.label(), "Flat No./Survey Number");
        assert_eq!(AddressField::Mobile.placeholder(), "9876543210");
        assert!(AddressField::ALL.iter().all(|f| !f.label().is_empty()));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let entry = AddressEntry::blank().with_field(AddressField::DoctorName, "Dr. Rao");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["doctorName"], "Dr. Rao");
        assert_eq!(json["hospitalClinic"], "");

        let field: AddressField = serde_json::from_str("\"hospitalClinic\"").unwrap();
        assert_eq!(field, AddressField::HospitalClinic);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = EntryId::new();
        let b = EntryId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36); // UUID format
        assert_eq!(a.to_string().parse::<EntryId>().unwrap(), a);
    }
}
