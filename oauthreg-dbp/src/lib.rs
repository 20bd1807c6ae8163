/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod dbp;
pub mod api {
    //! API objects shared by the gateway and the registry backends.

    mod api_error;
    mod api_object;
    mod client_authorization;
    mod field_error;
    mod object_meta;
    mod request_context;
    mod selectors;

    pub use self::api_error::ApiError;
    pub use self::api_error::ApiErrorKind;
    pub use self::api_object::ApiObject;
    pub use self::api_object::ClientAuthorizationList;
    pub use self::api_object::Status;
    pub use self::api_object::StatusKind;
    pub use self::client_authorization::ClientAuthorization;
    pub use self::field_error::FieldError;
    pub use self::field_error::FieldErrorKind;
    pub use self::object_meta::ObjectMeta;
    pub use self::request_context::RequestContext;
    pub use self::selectors::FieldSelector;
    pub use self::selectors::LabelSelector;
}
pub mod time;
