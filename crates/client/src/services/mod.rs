//! Typed wrappers for the REST surface, one module per area.
//!
//! Endpoint paths and payload shapes are external contracts; these
//! wrappers only add types and the shared authenticated transport.

pub mod ai_search;
pub mod auth;
pub mod common_code;
pub mod notification;
pub mod sr;
pub mod survey;
pub mod user;
pub mod wiki;

use crate::transport::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> auth::AuthApi {
        auth::AuthApi::new(self.clone())
    }

    pub fn sr(&self) -> sr::SrApi {
        sr::SrApi::new(self.clone())
    }

    pub fn survey(&self) -> survey::SurveyApi {
        survey::SurveyApi::new(self.clone())
    }

    pub fn users(&self) -> user::UserApi {
        user::UserApi::new(self.clone())
    }

    pub fn wiki(&self) -> wiki::WikiApi {
        wiki::WikiApi::new(self.clone())
    }

    pub fn notification(&self) -> notification::NotificationApi {
        notification::NotificationApi::new(self.clone())
    }

    pub fn common_code(&self) -> common_code::CommonCodeApi {
        common_code::CommonCodeApi::new(self.clone())
    }

    pub fn ai_search(&self) -> ai_search::AiSearchApi {
        ai_search::AiSearchApi::new(self.clone())
    }
}
