use actix_http::{HttpMessage, Request};
use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    web, App,
};
use devtrack_auth::{
    authenticator::user::{UserDetails, UserInformation},
    authorizer::Authorizer,
};
use utoipa_actix_web::UtoipaApp;

/// Convenient way of adding (authenticated) user information to the request.
pub trait TestAuthentication: Sized {
    /// Make the request an authenticated request with the provided user details
    fn test_auth_details(self, details: UserDetails) -> Self;

    /// Make the request an authenticated request with the provided username
    fn test_auth(self, id: impl Into<String>) -> Self {
        self.test_auth_details(UserDetails {
            id: id.into(),
            permissions: vec![],
        })
    }
}

impl TestAuthentication for Request {
    fn test_auth_details(self, details: UserDetails) -> Self {
        self.extensions_mut()
            .insert(UserInformation::Authenticated(details));
        self
    }
}

pub trait TestApp: Sized {
    /// Add an authorizer, suitable for testing
    fn add_test_authorizer(self) -> Self;
}

impl<T> TestApp for UtoipaApp<T>
where
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
{
    fn add_test_authorizer(self) -> Self {
        self.map(|app| app.add_test_authorizer())
    }
}

impl<T> TestApp for App<T>
where
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
{
    fn add_test_authorizer(self) -> Self {
        // a non-enforcing authorizer, requests pass permission checks without a token
        let authorizer = Authorizer::default();
        self.app_data(web::Data::new(authorizer))
    }
}
