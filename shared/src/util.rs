/// Number of digits in a one-time verification / reset code.
pub const ONE_TIME_CODE_LEN: usize = 5;

/// Generate a random numeric one-time code (zero-padded, fixed length).
///
/// Used for both email verification and password reset. The code is
/// short-lived by convention: it is cleared from the user record as soon
/// as it is consumed.
pub fn one_time_code() -> String {
    use rand::Rng;
    let max = 10u32.pow(ONE_TIME_CODE_LEN as u32);
    let n: u32 = rand::thread_rng().gen_range(0..max);
    format!("{n:0width$}", width = ONE_TIME_CODE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_time_code_is_fixed_length_digits() {
        for _ in 0..100 {
            let code = one_time_code();
            assert_eq!(code.len(), ONE_TIME_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
