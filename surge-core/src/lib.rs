mod http;

pub mod runner;

pub use http::{
    ClientConfig, Error, HttpClient, HttpRequest, HttpResponse, HttpTransportErrorKind, Result,
};
