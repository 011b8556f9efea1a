use crate::api::ByteStore;

/// 按 `Uint8Array` 的方式存入字节：向零截断后对 256 取模，非有限值存为 0
pub fn wrap_u8(v: f64) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    v.trunc().rem_euclid(256.0) as u8
}

/// 按 `Uint8ClampedArray` 的方式存入字节：钳制到 `[0, 255]` 后四舍六入五成双，NaN 存为 0
pub fn saturate_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

impl ByteStore {
    pub fn store(self, v: f64) -> u8 {
        match self {
            ByteStore::Wrap => wrap_u8(v),
            ByteStore::Saturate => saturate_u8(v),
        }
    }

    pub fn add(self, a: u8, b: u8) -> u8 {
        match self {
            ByteStore::Wrap => a.wrapping_add(b),
            ByteStore::Saturate => a.saturating_add(b),
        }
    }
}
