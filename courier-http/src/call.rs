//! The unit of work of an HTTP client.

use crate::{request::Request, response::Response};

/// A request and, once an engine answered it, its response.
///
/// This is the payload an HTTP client carries through its pipeline: `before`
/// stages see only the request, the engine fills in the response, and
/// `after` stages see both.
#[derive(Debug, Clone)]
pub struct Call {
    request: Request,
    response: Option<Response>,
}

impl Call {
    /// A call that has not been answered yet.
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: None,
        }
    }

    /// The request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// The request, mutably.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// The response, if any.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// The response, mutably.
    pub fn response_mut(&mut self) -> Option<&mut Response> {
        self.response.as_mut()
    }

    /// Whether a response is present.
    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }

    /// Replace the response.
    pub fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    /// Builder form of [`Call::set_response`].
    pub fn with_response(mut self, response: Response) -> Self {
        self.set_response(response);
        self
    }

    /// Remove the response.
    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }

    /// Split into request and response.
    pub fn into_parts(self) -> (Request, Option<Response>) {
        (self.request, self.response)
    }
}

impl From<Request> for Call {
    fn from(request: Request) -> Self {
        Self::new(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;

    #[test]
    fn test_answer_and_take() {
        let mut call = Call::from(Request::get("/ping").unwrap());
        assert!(!call.is_answered());

        call.set_response(Response::new(StatusCode::NO_CONTENT));
        assert_eq!(call.response().unwrap().status(), StatusCode::NO_CONTENT);

        call.response_mut()
            .unwrap()
            .headers_mut()
            .insert("X-Trace", "1")
            .unwrap();
        let response = call.take_response().unwrap();
        assert!(response.headers().contains("x-trace"));
        assert!(call.response().is_none());

        let (request, response) = call.with_response(Response::ok()).into_parts();
        assert_eq!(request.uri().path().as_str(), "/ping");
        assert!(response.is_some());
    }
}
