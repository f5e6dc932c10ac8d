use crate::components::{OutputRecord, ResponseDescriptor};

/// Copies a response into an output record. The status is not interpreted.
pub fn emit(response: ResponseDescriptor) -> OutputRecord {
    OutputRecord {
        status: response.status_code,
        headers: response.headers,
        body: response.body,
    }
}

impl From<ResponseDescriptor> for OutputRecord {
    fn from(response: ResponseDescriptor) -> Self {
        emit(response)
    }
}
