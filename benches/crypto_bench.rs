//! Cookie export crypto benchmark.
//!
//! Key derivation dominates; AES-GCM is measured separately.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tempguard::cookies::cookiecrypto::{self, SALT_LEN};
use tempguard::cookies::{CookieRecord, ExportContainer};

fn sample_cookies(count: usize) -> Vec<CookieRecord> {
    (0..count)
        .map(|i| CookieRecord::new(format!("cookie_{i}"), "x".repeat(64), ".chatgpt.com").secure(true))
        .collect()
}

fn crypto_derive_key(c: &mut Criterion) {
    let salt = [0x5au8; SALT_LEN];
    c.bench_function("pbkdf2_sha256_10k", |b| {
        b.iter(|| cookiecrypto::derive_key(black_box("hunter2"), black_box(&salt)))
    });
}

fn crypto_roundtrip(c: &mut Criterion) {
    let payload = vec![0x42u8; 16 * 1024];
    let sealed = cookiecrypto::encrypt(&payload, "hunter2").unwrap();

    c.bench_function("decrypt_16k", |b| {
        b.iter(|| cookiecrypto::decrypt(black_box(&sealed.bundle), "hunter2", &sealed.salt))
    });
}

fn container_seal(c: &mut Criterion) {
    let cookies = sample_cookies(50);

    c.bench_function("container_plain_50", |b| {
        b.iter(|| ExportContainer::seal(black_box(&cookies), None))
    });

    c.bench_function("container_encrypted_50", |b| {
        b.iter(|| ExportContainer::seal(black_box(&cookies), Some("hunter2")))
    });
}

criterion_group!(benches, crypto_derive_key, crypto_roundtrip, container_seal);
criterion_main!(benches);
