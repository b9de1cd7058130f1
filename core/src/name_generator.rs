//! Deterministic customer identity generation for sample datasets.
//!
//! Same RNG stream = same names and phone numbers.

use crate::{phone::format_phone_input, rng::SampleRng};

pub struct NameGenerator;

impl NameGenerator {
    /// Family name followed by a two-syllable given name, e.g. `김서연`.
    pub fn generate_full_name(rng: &mut SampleRng) -> String {
        format!(
            "{}{}",
            rng.pick(Self::family_names()),
            rng.pick(Self::given_names())
        )
    }

    /// A `010-XXXX-XXXX` mobile number.
    pub fn generate_mobile(rng: &mut SampleRng) -> String {
        let subscriber = rng.next_u64_below(100_000_000);
        format_phone_input(&format!("010{subscriber:08}"))
    }

    fn family_names() -> &'static [&'static str] {
        &[
            "김", "이", "박", "최", "정", "강", "조", "윤", "장", "임",
            "한", "오", "서", "신", "권", "황", "안", "송", "류", "홍",
        ]
    }

    fn given_names() -> &'static [&'static str] {
        &[
            "서연", "민준", "지우", "서준", "하은", "도윤", "수아", "예준",
            "지아", "시우", "하린", "주원", "지유", "하준", "윤서", "지호",
            "채원", "준서", "다은", "건우", "소율", "현우", "예린", "우진",
        ]
    }
}
