use hickory_proto::op::ResponseCode;

/// Completion statuses reported by `HickoryResolverContext`.
///
/// `SUCCESS` covers both NOERROR and NXDOMAIN; callers see an empty answer
/// for a name that does not exist.
pub struct ResolverStatus;

impl ResolverStatus {
    pub const SUCCESS: i32 = 0;
    pub const TRANSPORT_FAILURE: i32 = -1;
    pub const SERVER_FAILURE: i32 = -2;
    pub const REFUSED: i32 = -3;
    pub const OTHER_RCODE: i32 = -4;
    pub const BAD_RESPONSE: i32 = -5;

    pub fn from_rcode(rcode: ResponseCode) -> i32 {
        match rcode {
            ResponseCode::NoError | ResponseCode::NXDomain => Self::SUCCESS,
            ResponseCode::ServFail => Self::SERVER_FAILURE,
            ResponseCode::Refused => Self::REFUSED,
            _ => Self::OTHER_RCODE,
        }
    }

    pub fn describe(status: i32) -> &'static str {
        match status {
            Self::SUCCESS => "success",
            Self::TRANSPORT_FAILURE => "all upstream servers unreachable",
            Self::SERVER_FAILURE => "upstream SERVFAIL",
            Self::REFUSED => "upstream REFUSED",
            Self::OTHER_RCODE => "upstream returned an error rcode",
            Self::BAD_RESPONSE => "undecodable upstream response",
            _ => "unknown status",
        }
    }
}
