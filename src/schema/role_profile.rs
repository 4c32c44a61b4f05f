use poem_openapi::{payload::Json, types::multipart::Upload, ApiResponse, Multipart, Object};
use serde::Deserialize;

use crate::{
    core::{
        onboarding::OnboardingStep,
        validation::{ValidationError, Validator},
    },
    impl_api_error,
    model::enums::{ItemCategory, PaymentMethod},
    service::role_profile::{
        ImageFile, MedicalRepDraft, OrderBookerDraft, RoleProfileDraft, SupplierDraft, TraderDraft,
    },
};

use super::common::{
    BadRequestResponse, ConflictResponse, InternalServerErrorResponse, UnauthorizedResponse,
    ValidationErrorResponse,
};

/// Reads an uploaded file into memory. Uploads larger than `max_size` are
/// not read, and they come back empty like unreadable ones, to be rejected
/// by [`check_image`].
async fn read_upload(upload: Option<Upload>, max_size: usize) -> Option<ImageFile> {
    let upload = upload?;
    let file_name = upload.file_name().map(|x| x.to_string());
    let content_type = upload.content_type().map(|x| x.to_string());
    if upload.size() > max_size {
        tracing::debug!(
            "upload {:?} of {} bytes exceeds {} bytes",
            file_name,
            upload.size(),
            max_size
        );
        return Some(ImageFile {
            file_name,
            content_type,
            bytes: vec![],
        });
    }
    let bytes = match upload.into_vec().await {
        Ok(val) => val,
        Err(err) => {
            tracing::debug!("failed to read upload {:?}: {}", file_name, err);
            vec![]
        }
    };
    Some(ImageFile {
        file_name,
        content_type,
        bytes,
    })
}

fn check_image(
    v: &mut Validator,
    field: &str,
    image: Option<ImageFile>,
    max_size: usize,
) -> Option<ImageFile> {
    let image = image?;
    let is_image = image
        .content_type
        .as_deref()
        .is_none_or(|x| x.starts_with("image/"));
    if image.bytes.is_empty() || image.bytes.len() > max_size || !is_image {
        v.add(field, "invalidImage");
        return None;
    }
    Some(image)
}

fn contact_number(v: &mut Validator, value: &str) -> String {
    v.min_chars("contact_number", value, 10, "invalidContactNumber")
}

fn cnic_number(v: &mut Validator, value: &str) -> String {
    v.min_chars("cnic_number", value, 13, "invalidCnic")
}

fn categories(v: &mut Validator, values: &[String]) -> Vec<ItemCategory> {
    v.at_least_one("item_categories", values, "selectCategory")
}

fn payment_methods(v: &mut Validator, values: &[String]) -> Vec<PaymentMethod> {
    v.at_least_one("payment_methods", values, "selectPaymentMethod")
}

#[derive(Multipart)]
pub struct TraderForm {
    pub shop_name: Option<String>,
    pub owner_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub availability_status: Option<String>,
    pub open_hours: Option<String>,
    pub item_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub license_picture: Option<Upload>,
    pub profile_picture: Option<Upload>,
}

impl TraderForm {
    pub async fn into_draft(mut self, max_size: usize) -> Result<RoleProfileDraft, ValidationError> {
        let license = read_upload(self.license_picture.take(), max_size).await;
        let profile = read_upload(self.profile_picture.take(), max_size).await;
        self.validate(license, profile, max_size)
            .map(RoleProfileDraft::Trader)
    }

    pub fn validate(
        &self,
        license: Option<ImageFile>,
        profile: Option<ImageFile>,
        max_size: usize,
    ) -> Result<TraderDraft, ValidationError> {
        let mut v = Validator::new();
        let draft = TraderDraft {
            shop_name: v.required("shop_name", text(&self.shop_name), Some(100)),
            owner_name: v.required("owner_name", text(&self.owner_name), Some(100)),
            contact_number: contact_number(&mut v, text(&self.contact_number)),
            address: v.required("address", text(&self.address), Some(500)),
            availability_status: v
                .choice("availability_status", self.availability_status.as_deref()),
            open_hours: v.optional("open_hours", self.open_hours.as_deref(), 100),
            item_categories: categories(&mut v, &self.item_categories),
            payment_methods: payment_methods(&mut v, &self.payment_methods),
            license_picture: check_image(&mut v, "license_picture", license, max_size),
            profile_picture: check_image(&mut v, "profile_picture", profile, max_size),
        };
        v.max_chars("contact_number", &draft.contact_number, 20);
        v.finish(draft)
    }
}

#[derive(Multipart)]
pub struct SupplierForm {
    pub company_name: Option<String>,
    pub owner_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub item_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub license_picture: Option<Upload>,
    pub profile_picture: Option<Upload>,
}

impl SupplierForm {
    pub async fn into_draft(mut self, max_size: usize) -> Result<RoleProfileDraft, ValidationError> {
        let license = read_upload(self.license_picture.take(), max_size).await;
        let profile = read_upload(self.profile_picture.take(), max_size).await;
        self.validate(license, profile, max_size)
            .map(RoleProfileDraft::Supplier)
    }

    pub fn validate(
        &self,
        license: Option<ImageFile>,
        profile: Option<ImageFile>,
        max_size: usize,
    ) -> Result<SupplierDraft, ValidationError> {
        let mut v = Validator::new();
        let draft = SupplierDraft {
            company_name: v.required("company_name", text(&self.company_name), None),
            owner_name: v.required("owner_name", text(&self.owner_name), None),
            contact_number: contact_number(&mut v, text(&self.contact_number)),
            address: v.min_chars("address", text(&self.address), 5, "fieldTooShort"),
            item_categories: categories(&mut v, &self.item_categories),
            payment_methods: payment_methods(&mut v, &self.payment_methods),
            license_picture: check_image(&mut v, "license_picture", license, max_size),
            profile_picture: check_image(&mut v, "profile_picture", profile, max_size),
        };
        v.finish(draft)
    }
}

#[derive(Multipart)]
pub struct MedicalRepForm {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub contact_number: Option<String>,
    pub cnic_number: Option<String>,
    pub coverage_area: Option<String>,
    pub profile_picture: Option<Upload>,
}

impl MedicalRepForm {
    pub async fn into_draft(mut self, max_size: usize) -> Result<RoleProfileDraft, ValidationError> {
        let profile = read_upload(self.profile_picture.take(), max_size).await;
        self.validate(profile, max_size)
            .map(RoleProfileDraft::MedicalRep)
    }

    pub fn validate(
        &self,
        profile: Option<ImageFile>,
        max_size: usize,
    ) -> Result<MedicalRepDraft, ValidationError> {
        let mut v = Validator::new();
        let draft = MedicalRepDraft {
            full_name: v.required("full_name", text(&self.full_name), None),
            company_name: v.required("company_name", text(&self.company_name), None),
            contact_number: contact_number(&mut v, text(&self.contact_number)),
            cnic_number: cnic_number(&mut v, text(&self.cnic_number)),
            coverage_area: v.required("coverage_area", text(&self.coverage_area), None),
            profile_picture: check_image(&mut v, "profile_picture", profile, max_size),
        };
        v.finish(draft)
    }
}

#[derive(Multipart)]
pub struct OrderBookerForm {
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub cnic_number: Option<String>,
    pub working_for: Option<String>,
    pub coverage_area: Option<String>,
    pub profile_picture: Option<Upload>,
}

impl OrderBookerForm {
    pub async fn into_draft(mut self, max_size: usize) -> Result<RoleProfileDraft, ValidationError> {
        let profile = read_upload(self.profile_picture.take(), max_size).await;
        self.validate(profile, max_size)
            .map(RoleProfileDraft::OrderBooker)
    }

    pub fn validate(
        &self,
        profile: Option<ImageFile>,
        max_size: usize,
    ) -> Result<OrderBookerDraft, ValidationError> {
        let mut v = Validator::new();
        let draft = OrderBookerDraft {
            full_name: v.required("full_name", text(&self.full_name), None),
            contact_number: contact_number(&mut v, text(&self.contact_number)),
            cnic_number: cnic_number(&mut v, text(&self.cnic_number)),
            working_for: v.required("working_for", text(&self.working_for), None),
            coverage_area: v.required("coverage_area", text(&self.coverage_area), None),
            profile_picture: check_image(&mut v, "profile_picture", profile, max_size),
        };
        v.finish(draft)
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

#[derive(Object, Deserialize)]
pub struct RoleProfileCreatedResponse {
    pub id: String,
    pub message: String,
    pub state: OnboardingStep,
    pub redirect_to: String,
}

#[derive(ApiResponse)]
pub enum RoleProfileResponses {
    #[oai(status = 201)]
    Created(Json<RoleProfileCreatedResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 422)]
    UnprocessableEntity(Json<ValidationErrorResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_api_error!(RoleProfileResponses);

#[cfg(test)]
mod tests {
    use crate::model::enums::AvailabilityStatus;

    use super::*;

    fn png(bytes: usize) -> Option<ImageFile> {
        Some(ImageFile {
            file_name: Some("shop.png".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: vec![1; bytes],
        })
    }

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn trader_form() -> TraderForm {
        TraderForm {
            shop_name: some("Al-Amin Pharmacy"),
            owner_name: some("Ali Khan"),
            contact_number: some("03001234567"),
            address: some("Jinnah Road, Quetta"),
            availability_status: None,
            open_hours: some("   "),
            item_categories: vec!["surgical".to_string(), "surgical".to_string()],
            payment_methods: vec!["easypaisa".to_string()],
            license_picture: None,
            profile_picture: None,
        }
    }

    #[test]
    fn test_trader_form_valid() {
        let draft = trader_form().validate(png(10), None, 100).unwrap();
        assert_eq!(draft.shop_name, "Al-Amin Pharmacy");
        assert_eq!(draft.availability_status, AvailabilityStatus::Active);
        assert_eq!(draft.open_hours, None);
        assert_eq!(draft.item_categories, vec![ItemCategory::Surgical]);
        assert!(draft.license_picture.is_some());
        assert!(draft.profile_picture.is_none());
    }

    #[test]
    fn test_trader_form_field_errors() {
        let mut form = trader_form();
        form.shop_name = some("x".repeat(101).as_str());
        form.owner_name = None;
        form.contact_number = some("0300123456789012345678");
        form.item_categories = vec![];
        form.payment_methods = vec!["cash".to_string()];
        form.availability_status = some("closed");
        let err = form.validate(png(0), png(101), 100).unwrap_err();
        assert_eq!(err.0.get("shop_name"), Some("fieldTooLong"));
        assert_eq!(err.0.get("owner_name"), Some("fieldRequired"));
        assert_eq!(err.0.get("contact_number"), Some("fieldTooLong"));
        assert_eq!(err.0.get("item_categories"), Some("selectCategory"));
        assert_eq!(err.0.get("payment_methods"), Some("invalidOption"));
        assert_eq!(err.0.get("availability_status"), Some("invalidOption"));
        assert_eq!(err.0.get("license_picture"), Some("invalidImage"));
        assert_eq!(err.0.get("profile_picture"), Some("invalidImage"));
    }

    #[test]
    fn test_non_image_upload_is_rejected() {
        let pdf = Some(ImageFile {
            file_name: Some("license.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            bytes: vec![1; 10],
        });
        let err = trader_form().validate(pdf, None, 100).unwrap_err();
        assert_eq!(err.0.get("license_picture"), Some("invalidImage"));
        assert_eq!(err.0.len(), 1);
    }

    #[test]
    fn test_supplier_form_rules() {
        let form = SupplierForm {
            company_name: some("Hikmat Distributors"),
            owner_name: some(" "),
            contact_number: some("0300"),
            address: some("Qta"),
            item_categories: vec!["net".to_string()],
            payment_methods: vec!["bankAccount".to_string()],
            license_picture: None,
            profile_picture: None,
        };
        let err = form.validate(None, None, 100).unwrap_err();
        assert_eq!(err.0.get("owner_name"), Some("fieldRequired"));
        assert_eq!(err.0.get("contact_number"), Some("invalidContactNumber"));
        assert_eq!(err.0.get("address"), Some("fieldTooShort"));
        assert_eq!(err.0.len(), 3);
    }

    #[test]
    fn test_medical_rep_and_order_booker_rules() {
        let rep = MedicalRepForm {
            full_name: some("Sana"),
            company_name: some("Getz Pharma"),
            contact_number: some("03001234567"),
            cnic_number: some("54400-123"),
            coverage_area: some("Quetta Cantt"),
            profile_picture: None,
        };
        let err = rep.validate(None, 100).unwrap_err();
        assert_eq!(err.0.get("cnic_number"), Some("invalidCnic"));
        assert_eq!(err.0.len(), 1);

        let booker = OrderBookerForm {
            full_name: some("Bilal"),
            contact_number: some("03001234567"),
            cnic_number: some("54400-1234567-1"),
            working_for: some("Zam Zam Traders"),
            coverage_area: some("Satellite Town"),
            profile_picture: None,
        };
        let draft = booker.validate(png(5), 100).unwrap();
        assert_eq!(draft.cnic_number, "54400-1234567-1");
        assert!(draft.profile_picture.is_some());
    }
}
