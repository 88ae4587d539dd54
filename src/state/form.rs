/// Create/edit form state
///
/// Holds the text typed into each input and turns it into a
/// validated `ProjectData`. Nothing that fails validation ever
/// reaches the repository; errors are reported per field.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::data::{Project, ProjectData, ProjectId, DATE_FORMAT};

/// Editable inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Size,
    Quantity,
    Deposit,
    Total,
    OrderDate,
    CurrentStateDate,
    EstimatedDeliveryDate,
    DeliveredDate,
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    /// Id of the project being edited, `None` when creating
    pub editing: Option<ProjectId>,
    pub title: String,
    pub size: String,
    pub quantity: String,
    pub deposit: String,
    pub total: String,
    pub order_date: String,
    pub current_state_date: String,
    pub estimated_delivery_date: String,
    pub delivered_date: String,
    /// Photo as a `data:` URI
    pub image: Option<String>,
    /// Messages from the last failed submit
    pub errors: FormErrors,
}

impl ProjectForm {
    /// Blank form for a new project, dated `today`
    pub fn new(today: NaiveDate) -> Self {
        let today = format_date(Some(today));
        Self {
            editing: None,
            title: String::new(),
            size: String::new(),
            quantity: "1".to_string(),
            deposit: "0".to_string(),
            total: "0".to_string(),
            order_date: today.clone(),
            current_state_date: today,
            estimated_delivery_date: String::new(),
            delivered_date: String::new(),
            image: None,
            errors: FormErrors::default(),
        }
    }

    /// Form prefilled from an existing project
    pub fn edit(project: &Project) -> Self {
        Self {
            editing: Some(project.id.clone()),
            title: project.title.clone(),
            size: project.size.clone(),
            quantity: project.quantity.to_string(),
            deposit: project.deposit.to_string(),
            total: project.total.to_string(),
            order_date: format_date(Some(project.order_date)),
            current_state_date: format_date(Some(project.current_state_date)),
            estimated_delivery_date: format_date(project.estimated_delivery_date),
            delivered_date: format_date(project.delivered_date),
            image: project.image.clone(),
            errors: FormErrors::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Size => &self.size,
            Field::Quantity => &self.quantity,
            Field::Deposit => &self.deposit,
            Field::Total => &self.total,
            Field::OrderDate => &self.order_date,
            Field::CurrentStateDate => &self.current_state_date,
            Field::EstimatedDeliveryDate => &self.estimated_delivery_date,
            Field::DeliveredDate => &self.delivered_date,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Size => &mut self.size,
            Field::Quantity => &mut self.quantity,
            Field::Deposit => &mut self.deposit,
            Field::Total => &mut self.total,
            Field::OrderDate => &mut self.order_date,
            Field::CurrentStateDate => &mut self.current_state_date,
            Field::EstimatedDeliveryDate => &mut self.estimated_delivery_date,
            Field::DeliveredDate => &mut self.delivered_date,
        };
        *slot = value;
    }

    pub fn set_image(&mut self, uri: String) {
        self.image = Some(uri);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Check every input and build the project data
    pub fn validate(&self) -> Result<ProjectData, FormErrors> {
        let mut errors = FormErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert(Field::Title, "Title is required");
        }

        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(quantity) if quantity >= 1 => Some(quantity),
            Ok(_) => {
                errors.insert(Field::Quantity, "Quantity must be at least 1");
                None
            }
            Err(_) if self.quantity.trim().is_empty() => {
                errors.insert(Field::Quantity, "Quantity is required");
                None
            }
            Err(_) => {
                errors.insert(Field::Quantity, "Quantity must be a whole number");
                None
            }
        };

        // A blank deposit means nothing was paid yet
        let deposit = if self.deposit.trim().is_empty() {
            Some(0.0)
        } else {
            check(&mut errors, Field::Deposit, parse_amount(&self.deposit))
        };
        let total = if self.total.trim().is_empty() {
            errors.insert(Field::Total, "Total is required");
            None
        } else {
            check(&mut errors, Field::Total, parse_amount(&self.total))
        };

        let order_date = required_date(&mut errors, Field::OrderDate, &self.order_date);
        let current_state_date =
            required_date(&mut errors, Field::CurrentStateDate, &self.current_state_date);
        let estimated_delivery_date = check(
            &mut errors,
            Field::EstimatedDeliveryDate,
            parse_optional_date(&self.estimated_delivery_date),
        );
        let delivered_date = check(
            &mut errors,
            Field::DeliveredDate,
            parse_optional_date(&self.delivered_date),
        );

        match (
            quantity,
            deposit,
            total,
            order_date,
            current_state_date,
            estimated_delivery_date,
            delivered_date,
        ) {
            (
                Some(quantity),
                Some(deposit),
                Some(total),
                Some(order_date),
                Some(current_state_date),
                Some(estimated_delivery_date),
                Some(delivered_date),
            ) if errors.is_empty() => Ok(ProjectData {
                title: title.to_string(),
                size: self.size.trim().to_string(),
                quantity,
                deposit,
                total,
                order_date,
                current_state_date,
                estimated_delivery_date,
                delivered_date,
                image: self.image.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Record the error of `result`, if any, under `field`
fn check<T>(errors: &mut FormErrors, field: Field, result: Result<T, &'static str>) -> Option<T> {
    result.map_err(|message| errors.insert(field, message)).ok()
}

fn required_date(errors: &mut FormErrors, field: Field, value: &str) -> Option<NaiveDate> {
    match parse_optional_date(value) {
        Ok(Some(date)) => Some(date),
        Ok(None) => {
            errors.insert(field, "Date is required");
            None
        }
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}

/// Non-negative amount with at most two decimals
fn parse_amount(value: &str) -> Result<f64, &'static str> {
    let amount: f64 = value.trim().parse().map_err(|_| "Enter a number")?;
    if !amount.is_finite() {
        return Err("Enter a number");
    }
    if amount < 0.0 {
        return Err("Amount cannot be negative");
    }
    let cents = amount * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err("Use at most two decimals");
    }
    Ok(amount)
}

fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| "Use the YYYY-MM-DD format")
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::{date, dragon};
    use chrono::Utc;
    use rstest::rstest;

    fn filled() -> ProjectForm {
        let mut form = ProjectForm::new(date("2024-04-01"));
        form.set(Field::Title, "Dragon".to_string());
        form.set(Field::Size, "15x10x8 cm".to_string());
        form.set(Field::Quantity, "2".to_string());
        form.set(Field::Deposit, "10".to_string());
        form.set(Field::Total, "30".to_string());
        form.set(Field::CurrentStateDate, "2024-04-10".to_string());
        form.set(Field::EstimatedDeliveryDate, "2024-04-30".to_string());
        form
    }

    #[test]
    fn test_new_form_defaults() {
        let form = ProjectForm::new(date("2024-04-01"));

        assert!(!form.is_editing());
        assert_eq!(form.quantity, "1");
        assert_eq!(form.deposit, "0");
        assert_eq!(form.total, "0");
        assert_eq!(form.order_date, "2024-04-01");
        assert_eq!(form.current_state_date, "2024-04-01");
        assert_eq!(form.delivered_date, "");
        assert_eq!(form.image, None);
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(filled().validate(), Ok(dragon()));
    }

    #[test]
    fn test_edit_prefills_every_field() {
        let mut data = dragon();
        data.delivered_date = Some(date("2024-05-01"));
        data.image = Some("data:image/png;base64,AAAA".to_string());
        let project = Project::from_data(ProjectId::from("p1"), Utc::now(), data.clone());

        let form = ProjectForm::edit(&project);

        assert_eq!(form.editing, Some(ProjectId::from("p1")));
        assert_eq!(form.delivered_date, "2024-05-01");
        assert_eq!(form.validate(), Ok(data));
    }

    #[test]
    fn test_blank_deposit_is_zero() {
        let mut form = filled();
        form.set(Field::Deposit, "  ".to_string());
        assert_eq!(form.validate().unwrap().deposit, 0.0);
    }

    #[test]
    fn test_title_is_trimmed() {
        let mut form = filled();
        form.set(Field::Title, "  Dragon  ".to_string());
        assert_eq!(form.validate().unwrap().title, "Dragon");
    }

    #[rstest]
    #[case(Field::Title, "   ")]
    #[case(Field::Quantity, "0")]
    #[case(Field::Quantity, "")]
    #[case(Field::Quantity, "1.5")]
    #[case(Field::Quantity, "-3")]
    #[case(Field::Deposit, "-1")]
    #[case(Field::Deposit, "abc")]
    #[case(Field::Deposit, "1.234")]
    #[case(Field::Total, "")]
    #[case(Field::Total, "-0.01")]
    #[case(Field::Total, "NaN")]
    #[case(Field::OrderDate, "")]
    #[case(Field::OrderDate, "01/04/2024")]
    #[case(Field::CurrentStateDate, "")]
    #[case(Field::EstimatedDeliveryDate, "2024-13-01")]
    #[case(Field::DeliveredDate, "yesterday")]
    fn test_invalid_field(#[case] field: Field, #[case] value: &str) {
        let mut form = filled();
        form.set(field, value.to_string());

        let errors = form.validate().unwrap_err();

        assert!(errors.get(field).is_some(), "{field:?} = {value:?} should be rejected");
        assert_eq!(errors.0.len(), 1);
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("12.5", 12.5)]
    #[case("99.99", 99.99)]
    #[case(" 7 ", 7.0)]
    fn test_amounts(#[case] value: &str, #[case] expected: f64) {
        assert_eq!(parse_amount(value), Ok(expected));
    }

    #[test]
    fn test_deposit_above_total_is_allowed() {
        let mut form = filled();
        form.set(Field::Deposit, "30".to_string());
        form.set(Field::Total, "20".to_string());

        let data = form.validate().unwrap();
        assert_eq!(data.total - data.deposit, -10.0);
    }

    #[test]
    fn test_several_errors_reported_together() {
        let mut form = filled();
        form.set(Field::Title, String::new());
        form.set(Field::Total, "-5".to_string());

        let errors = form.validate().unwrap_err();
        assert!(errors.get(Field::Title).is_some());
        assert!(errors.get(Field::Total).is_some());
        assert!(errors.get(Field::Quantity).is_none());
    }
}
