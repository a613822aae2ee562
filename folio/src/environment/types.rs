use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_profile_impl::ProfileFeatureServiceImpl;
use folio_extern_impl::telegram::TelegramApiServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<ContactFeature, ProfileFeature>;

// Extern
pub type TelegramApi = TelegramApiServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<TelegramApi>;
pub type ProfileFeature = ProfileFeatureServiceImpl;
