//! Month, weekday and holiday names.

use chrono::Weekday;

pub const MONTH_MUHARRAM: u32 = 1;
pub const MONTH_RABI_AL_AWWAL: u32 = 3;
pub const MONTH_RAJAB: u32 = 7;
pub const MONTH_SHABAN: u32 = 8;
pub const MONTH_RAMADAN: u32 = 9;
pub const MONTH_SHAWWAL: u32 = 10;
pub const MONTH_DHUL_HIJJAH: u32 = 12;

const MONTH_NAMES: [(&str, &str); 12] = [
    ("Muharram", "محرم"),
    ("Safar", "صفر"),
    ("Rabi' al-Awwal", "ربيع الأول"),
    ("Rabi' al-Thani", "ربيع الآخر"),
    ("Jumada al-Ula", "جمادى الأولى"),
    ("Jumada al-Akhirah", "جمادى الآخرة"),
    ("Rajab", "رجب"),
    ("Sha'ban", "شعبان"),
    ("Ramadan", "رمضان"),
    ("Shawwal", "شوال"),
    ("Dhu al-Qi'dah", "ذو القعدة"),
    ("Dhu al-Hijjah", "ذو الحجة"),
];

/// Returns Hijri month name.
pub fn hijri_month_name(month: u32) -> &'static str {
    month_entry(month).map_or("Unknown", |(en, _)| en)
}

/// Returns Hijri month name in Arabic script.
pub fn hijri_month_name_arabic(month: u32) -> &'static str {
    month_entry(month).map_or("غير معروف", |(_, ar)| ar)
}

fn month_entry(month: u32) -> Option<(&'static str, &'static str)> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn weekday_name_arabic(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "الاثنين",
        Weekday::Tue => "الثلاثاء",
        Weekday::Wed => "الأربعاء",
        Weekday::Thu => "الخميس",
        Weekday::Fri => "الجمعة",
        Weekday::Sat => "السبت",
        Weekday::Sun => "الأحد",
    }
}

/// Fixed-date observances. Exact day match only.
pub fn holiday(month: u32, day: u32) -> Option<&'static str> {
    let name = match (month, day) {
        (MONTH_MUHARRAM, 1) => "Islamic New Year",
        (MONTH_MUHARRAM, 10) => "Day of Ashura",
        (MONTH_RABI_AL_AWWAL, 12) => "Mawlid al-Nabi",
        (MONTH_RAJAB, 27) => "Isra and Mi'raj",
        (MONTH_SHABAN, 15) => "Mid-Sha'ban",
        (MONTH_RAMADAN, 1) => "First Day of Ramadan",
        (MONTH_RAMADAN, 27) => "Laylat al-Qadr",
        (MONTH_SHAWWAL, 1) => "Eid al-Fitr",
        (MONTH_DHUL_HIJJAH, 8) => "Day of Tarwiyah",
        (MONTH_DHUL_HIJJAH, 9) => "Day of Arafah",
        (MONTH_DHUL_HIJJAH, 10) => "Eid al-Adha",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(hijri_month_name(9), "Ramadan");
        assert_eq!(hijri_month_name_arabic(9), "رمضان");
        assert_eq!(hijri_month_name(12), "Dhu al-Hijjah");
        assert_eq!(hijri_month_name(0), "Unknown");
        assert_eq!(hijri_month_name(13), "Unknown");
    }

    #[test]
    fn test_holiday_exact_match_only() {
        assert_eq!(holiday(9, 1), Some("First Day of Ramadan"));
        assert_eq!(holiday(10, 1), Some("Eid al-Fitr"));
        assert_eq!(holiday(12, 10), Some("Eid al-Adha"));
        assert_eq!(holiday(9, 2), None);
        assert_eq!(holiday(12, 11), None);
    }
}
