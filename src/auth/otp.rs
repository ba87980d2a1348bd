use argon2::password_hash::rand_core::{OsRng, RngCore};
use moka::future::Cache;
use std::time::Duration;

/// Pending one-time passwords keyed by user id. Entries expire after the TTL.
#[derive(Clone)]
pub struct OtpStore {
    cache: Cache<u64, String>,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Creates a fresh 6-digit code for the user, replacing any pending one.
    pub async fn issue(&self, user_id: u64) -> String {
        let otp = generate_otp();
        self.cache.insert(user_id, otp.clone()).await;
        otp
    }

    /// Consumes the pending code when it matches. A mismatch leaves it in place.
    pub async fn verify(&self, user_id: u64, otp: &str) -> bool {
        match self.cache.get(&user_id).await {
            Some(stored) if stored == otp => {
                self.cache.invalidate(&user_id).await;
                true
            }
            _ => false,
        }
    }
}

fn generate_otp() -> String {
    (100_000 + OsRng.next_u32() % 900_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.parse::<u32>().unwrap() >= 100_000);
        }
    }

    #[actix_web::test]
    async fn otp_is_single_use() {
        let store = OtpStore::new(Duration::from_secs(60));
        let otp = store.issue(1).await;

        assert!(!store.verify(1, "000000").await);
        assert!(!store.verify(2, &otp).await);
        assert!(store.verify(1, &otp).await);
        assert!(!store.verify(1, &otp).await);
    }

    #[actix_web::test]
    async fn reissue_replaces_pending_code() {
        let store = OtpStore::new(Duration::from_secs(60));
        let first = store.issue(3).await;
        let second = store.issue(3).await;
        if first != second {
            assert!(!store.verify(3, &first).await);
        }
        assert!(store.verify(3, &second).await);
    }

    #[actix_web::test]
    async fn expired_code_is_rejected() {
        let store = OtpStore::new(Duration::from_millis(50));
        let otp = store.issue(1).await;
        actix_web::rt::time::sleep(Duration::from_millis(120)).await;
        assert!(!store.verify(1, &otp).await);
    }
}
