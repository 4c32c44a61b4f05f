//! Key based string lookup for the two portal locales.
//!
//! A [`Translator`] is built per request from the caller's language and
//! passed to whatever needs localized text. Lookups of a key that the
//! catalogue does not know return the key itself, so a missing entry shows
//! up verbatim instead of as blank text.

use std::{collections::HashMap, sync::OnceLock};

use crate::model::enums::Language;

const ENGLISH: &[(&str, &str)] = &[
    // auth
    ("signUp", "Sign Up"),
    ("login", "Login"),
    ("email", "Email"),
    ("username", "Username"),
    ("password", "Password"),
    ("confirmPassword", "Confirm Password"),
    ("alreadyHaveAccount", "Already have an account?"),
    ("dontHaveAccount", "Don't have an account?"),
    ("rememberMe", "Remember Me"),
    ("forgotPassword", "Forgot Password?"),
    // account types
    ("selectAccountType", "Select Your Account Type"),
    ("trader", "Trader"),
    ("supplier", "Supplier"),
    ("medicalRepresentative", "Medical Representative"),
    ("medicalStoreOwner", "Medical Store Owner"),
    ("orderBooker", "Order Booker"),
    ("continue", "Continue"),
    // language selection
    ("selectLanguage", "Select Your Preferred Language"),
    ("english", "English"),
    ("urdu", "اردو"),
    ("changeLanguageLater", "You can change this later in settings"),
    // dashboard
    ("welcome", "Welcome to QMTA Portal"),
    ("dashboard", "Dashboard"),
    ("dashboardReady", "Your dashboard is ready. Manage your business from here"),
    ("logout", "Logout"),
    ("profile", "Profile"),
    ("accountType", "Account Type"),
    ("language", "Language"),
    // common
    ("loading", "Loading..."),
    ("submit", "Submit"),
    ("cancel", "Cancel"),
    ("save", "Save"),
    // portal
    ("portalTitle", "Quetta Medicine Traders Association"),
    ("portalSubtitle", "Professional Portal for Medical Industry"),
    // role forms
    ("traderDetails", "Trader Details"),
    ("shopName", "Shop Name"),
    ("ownerName", "Owner Name"),
    ("contactNumber", "Contact Number"),
    ("uploadLicense", "Upload License Picture"),
    ("address", "Address"),
    ("availability", "Availability"),
    ("active", "Active"),
    ("inactive", "Inactive"),
    ("openHours", "Open Hours (Optional)"),
    ("itemCategories", "Item Categories"),
    ("multinational", "Multinational"),
    ("net", "Net"),
    ("surgical", "Surgical"),
    ("homeopathic", "Homeopathic"),
    ("supplierDetails", "Supplier Details"),
    ("medicalRepDetails", "Medical Representative Details"),
    ("orderBookerDetails", "Order Booker Details"),
    ("companyName", "Company Name"),
    ("fullName", "Full Name"),
    ("cnicNumber", "CNIC Number"),
    ("coverageArea", "Coverage Area"),
    ("workingFor", "Working For"),
    ("paymentMethods", "Payment Methods"),
    ("easypaisa", "Easypaisa"),
    ("jazzcash", "JazzCash"),
    ("bankAccount", "Bank Account"),
    ("uploadProfilePicture", "Upload Profile Picture"),
    ("clickToUpload", "Click to upload"),
    ("submitting", "Submitting..."),
    ("profileCreated", "Profile created successfully"),
    // home and shell
    ("home", "Home"),
    ("aboutUs", "About Us"),
    ("services", "Services"),
    ("communityPage", "Community Page"),
    ("complaintPage", "Complaint Page"),
    ("contact", "Contact"),
    ("contactSupplier", "Contact Supplier"),
    ("contactMedicalOwner", "Contact Medical Store Owner"),
    ("contactMedicalRep", "Contact Medical Representative"),
    ("contactOrderBooker", "Contact Order Booker"),
    ("quickContacts", "Quick Contacts"),
    ("searchPlaceholder", "Search..."),
    ("aboutBody", "Welcome to QMTA - Quetta Medical Trade Association"),
    ("communityBody", "Connect with other members of the association."),
    ("complaintsBody", "Submit and track complaints with the association."),
    ("contactBody", "Contact information will appear here."),
    // toasts
    ("successfullySaved", "Successfully saved!"),
    ("errorOccurred", "An error occurred"),
    ("accountCreated", "Account created successfully!"),
    ("emailAlreadyRegistered", "This email is already registered"),
    ("invalidCredentials", "Invalid credentials"),
    ("failedToCreateProfile", "Failed to create profile"),
    ("profileAlreadyExists", "Profile already submitted"),
    ("uploadFailed", "Failed to upload picture"),
    ("welcomeToast", "Welcome!"),
    ("signedOut", "Signed out"),
    ("errorSigningOut", "Error signing out"),
    ("sessionRequired", "Please sign in to continue"),
    ("stepNotAvailable", "Please complete the previous step first"),
    ("fixFormErrors", "Please correct the highlighted fields"),
    // field errors
    ("fieldRequired", "This field is required"),
    ("fieldTooLong", "This field is too long"),
    ("fieldTooShort", "This field is too short"),
    ("invalidEmail", "Invalid email address"),
    ("usernameLength", "Username must be at least 3 characters"),
    ("passwordLength", "Password must be at least 6 characters"),
    ("passwordsDontMatch", "Passwords don't match"),
    ("invalidContactNumber", "Valid contact number required"),
    ("invalidCnic", "Valid CNIC number required"),
    ("selectCategory", "Select at least one category"),
    ("selectPaymentMethod", "Select at least one payment method"),
    ("invalidOption", "Invalid option"),
    ("invalidImage", "Invalid image file"),
];

const URDU: &[(&str, &str)] = &[
    // auth
    ("signUp", "رجسٹر کریں"),
    ("login", "لاگ ان"),
    ("email", "ای میل"),
    ("username", "صارف نام"),
    ("password", "پاس ورڈ"),
    ("confirmPassword", "پاس ورڈ کی تصدیق کریں"),
    ("alreadyHaveAccount", "پہلے سے اکاؤنٹ ہے؟"),
    ("dontHaveAccount", "اکاؤنٹ نہیں ہے؟"),
    ("rememberMe", "مجھے یاد رکھیں"),
    ("forgotPassword", "پاس ورڈ بھول گئے؟"),
    // account types
    ("selectAccountType", "اپنی اکاؤنٹ کی قسم منتخب کریں"),
    ("trader", "تاجر"),
    ("supplier", "سپلائر"),
    ("medicalRepresentative", "میڈیکل نمائندہ"),
    ("medicalStoreOwner", "میڈیکل سٹور مالک"),
    ("orderBooker", "آرڈر بُکر"),
    ("continue", "جاری رکھیں"),
    // language selection
    ("selectLanguage", "اپنی پسندیدہ زبان منتخب کریں"),
    ("english", "English"),
    ("urdu", "اردو"),
    ("changeLanguageLater", "آپ بعد میں بھی زبان تبدیل کر سکتے ہیں"),
    // dashboard
    ("welcome", "کوئٹہ میڈیسن ٹریڈرز ایسوسی ایشن میں خوش آمدید"),
    ("dashboard", "ڈیش بورڈ"),
    ("dashboardReady", "آپ کا ڈیش بورڈ تیار ہے۔ یہاں سے اپنے کاروبار کو منظم کریں"),
    ("logout", "لاگ آؤٹ"),
    ("profile", "پروفائل"),
    ("accountType", "اکاؤنٹ کی قسم"),
    ("language", "زبان"),
    // common
    ("loading", "لوڈ ہو رہا ہے..."),
    ("submit", "جمع کروائیں"),
    ("cancel", "منسوخ کریں"),
    ("save", "محفوظ کریں"),
    // portal
    ("portalTitle", "کوئٹہ میڈیسن ٹریڈرز ایسوسی ایشن"),
    ("portalSubtitle", "طبی صنعت کے لیے پیشہ ورانہ پورٹل"),
    // role forms
    ("traderDetails", "تاجر کی تفصیلات"),
    ("shopName", "دکان کا نام"),
    ("ownerName", "مالک کا نام"),
    ("contactNumber", "رابطہ نمبر"),
    ("uploadLicense", "لائسنس کی تصویر اپ لوڈ کریں"),
    ("address", "پتہ"),
    ("availability", "دستیابی"),
    ("active", "فعال"),
    ("inactive", "غیر فعال"),
    ("openHours", "کھلنے کے اوقات (اختیاری)"),
    ("itemCategories", "اشیاء کی اقسام"),
    ("multinational", "ملٹی نیشنل"),
    ("net", "نیٹ"),
    ("surgical", "سرجیکل"),
    ("homeopathic", "ہومیوپیتھک"),
    ("supplierDetails", "سپلائر کی تفصیلات"),
    ("medicalRepDetails", "میڈیکل نمائندے کی تفصیلات"),
    ("orderBookerDetails", "آرڈر بُکر کی تفصیلات"),
    ("companyName", "کمپنی کا نام"),
    ("fullName", "مکمل نام"),
    ("cnicNumber", "شناختی کارڈ نمبر"),
    ("coverageArea", "کوریج علاقہ"),
    ("workingFor", "کام کر رہے ہیں"),
    ("paymentMethods", "ادائیگی کے طریقے"),
    ("easypaisa", "ایزی پیسہ"),
    ("jazzcash", "جاز کیش"),
    ("bankAccount", "بینک اکاؤنٹ"),
    ("uploadProfilePicture", "پروفائل تصویر اپ لوڈ کریں"),
    ("clickToUpload", "اپ لوڈ کرنے کے لیے کلک کریں"),
    ("submitting", "جمع کرایا جا رہا ہے..."),
    ("profileCreated", "پروفائل کامیابی سے بنایا گیا"),
    // home and shell
    ("home", "ہوم"),
    ("aboutUs", "ہمارے بارے میں"),
    ("services", "خدمات"),
    ("communityPage", "کمیونٹی صفحہ"),
    ("complaintPage", "شکایت صفحہ"),
    ("contact", "رابطہ"),
    ("contactSupplier", "سپلائر سے رابطہ کریں"),
    ("contactMedicalOwner", "میڈیکل سٹور مالک سے رابطہ کریں"),
    ("contactMedicalRep", "میڈیکل نمائندے سے رابطہ کریں"),
    ("contactOrderBooker", "آرڈر بُکر سے رابطہ کریں"),
    ("quickContacts", "فوری رابطے"),
    ("searchPlaceholder", "تلاش کریں..."),
    ("aboutBody", "کیو ایم ٹی اے - کوئٹہ میڈیکل ٹریڈ ایسوسی ایشن میں خوش آمدید"),
    ("communityBody", "ایسوسی ایشن کے دیگر اراکین سے رابطہ کریں۔"),
    ("complaintsBody", "ایسوسی ایشن کے ساتھ شکایات درج کریں اور ان کا پتہ رکھیں۔"),
    ("contactBody", "رابطہ کی معلومات یہاں ظاہر ہوں گی۔"),
    // toasts
    ("successfullySaved", "کامیابی سے محفوظ ہو گیا!"),
    ("errorOccurred", "ایک خرابی واقع ہوئی"),
    ("accountCreated", "اکاؤنٹ کامیابی سے بنایا گیا!"),
    ("emailAlreadyRegistered", "یہ ای میل پہلے سے رجسٹرڈ ہے"),
    ("invalidCredentials", "غلط ای میل یا پاس ورڈ"),
    ("failedToCreateProfile", "پروفائل بنانے میں ناکامی"),
    ("profileAlreadyExists", "پروفائل پہلے ہی جمع ہو چکا ہے"),
    ("uploadFailed", "تصویر اپ لوڈ کرنے میں ناکامی"),
    ("welcomeToast", "خوش آمدید!"),
    ("signedOut", "لاگ آؤٹ ہو گیا"),
    ("errorSigningOut", "لاگ آؤٹ میں خرابی"),
    ("sessionRequired", "جاری رکھنے کے لیے لاگ ان کریں"),
    ("stepNotAvailable", "پہلے پچھلا مرحلہ مکمل کریں"),
    ("fixFormErrors", "براہ کرم نشان زدہ خانے درست کریں"),
    // field errors
    ("fieldRequired", "یہ خانہ ضروری ہے"),
    ("fieldTooLong", "یہ خانہ بہت لمبا ہے"),
    ("fieldTooShort", "یہ خانہ بہت چھوٹا ہے"),
    ("invalidEmail", "غلط ای میل پتہ"),
    ("usernameLength", "صارف نام کم از کم 3 حروف کا ہونا چاہیے"),
    ("passwordLength", "پاس ورڈ کم از کم 6 حروف کا ہونا چاہیے"),
    ("passwordsDontMatch", "پاس ورڈ مماثل نہیں ہیں"),
    ("invalidContactNumber", "درست رابطہ نمبر درکار ہے"),
    ("invalidCnic", "درست شناختی کارڈ نمبر درکار ہے"),
    ("selectCategory", "کم از کم ایک قسم منتخب کریں"),
    ("selectPaymentMethod", "کم از کم ایک ادائیگی کا طریقہ منتخب کریں"),
    ("invalidOption", "غلط انتخاب"),
    ("invalidImage", "غلط تصویر"),
];

fn catalogue(language: Language) -> &'static HashMap<&'static str, &'static str> {
    static ENGLISH_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static URDU_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match language {
        Language::English => ENGLISH_MAP.get_or_init(|| ENGLISH.iter().copied().collect()),
        Language::Urdu => URDU_MAP.get_or_init(|| URDU.iter().copied().collect()),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Locale of the caller: the stored profile language wins over the
    /// requested one, English when neither is known.
    pub fn resolve(profile_language: Option<Language>, requested: Option<Language>) -> Self {
        Self::new(profile_language.or(requested).unwrap_or_default())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the localized string, or `key` unchanged when the catalogue has no entry.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        catalogue(self.language).get(key).copied()
    }

    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        let source = match self.language {
            Language::English => ENGLISH,
            Language::Urdu => URDU,
        };
        source.to_vec()
    }
}
