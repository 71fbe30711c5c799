/// Prefixes a failure message with the location it was raised at.
#[macro_export]
macro_rules! here {
    ($e:expr) => {
        format!("at {}:{}:{}: {}", file!(), line!(), column!(), $e)
    };
}
