use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    core::i18n::Translator,
    model::enums::Language,
    schema::translation::{
        TranslationLookupResponse, TranslationLookupResponses, TranslationTableResponse,
        TranslationTableResponses,
    },
};

#[derive(Tags)]
enum ApiTranslationTags {
    Translation,
}

pub struct ApiTranslation;

#[OpenApi]
impl ApiTranslation {
    /// Whole string table of a locale, English by default
    #[oai(
        path = "/translations",
        method = "get",
        tag = "ApiTranslationTags::Translation"
    )]
    async fn translation_table(&self, lang: Query<Option<Language>>) -> TranslationTableResponses {
        let tr = Translator::resolve(None, lang.0);
        let entries = tr
            .entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        TranslationTableResponses::Ok(Json(TranslationTableResponse {
            language: tr.language(),
            entries,
        }))
    }

    #[oai(
        path = "/translations/lookup",
        method = "get",
        tag = "ApiTranslationTags::Translation"
    )]
    async fn translation_lookup(
        &self,
        key: Query<String>,
        lang: Query<Option<Language>>,
    ) -> TranslationLookupResponses {
        let tr = Translator::resolve(None, lang.0);
        TranslationLookupResponses::Ok(Json(TranslationLookupResponse {
            language: tr.language(),
            found: tr.lookup(&key.0).is_some(),
            value: tr.t(&key.0),
            key: key.0,
        }))
    }
}
