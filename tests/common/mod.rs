#![allow(dead_code)]
use hipcat::{StarCatalog, StarRecord};

/// A handful of well-known stars plus edge-case rows.
///
/// Rows:
///  0. Sirius      – A0m..., very close, negative Vmag
///  1. Betelgeuse  – M2Ib, variable
///  2. Rigel       – B8Ia:
///  3. Sun-like    – G2V at 10 pc
///  4. Arcturus    – K2IIIp
///  5. zero parallax, unknown class ("DA" white dwarf)
///  6. every field missing
///  7. negative parallax, lowercase class
///  8. O star, B-V exactly at the temperature pole
///  9. F star without Hp magnitude
pub fn sample_catalog() -> StarCatalog {
    vec![
        StarRecord {
            hip: Some(32349),
            ra_deg: Some(101.28715539),
            dec_deg: Some(-16.71611582),
            parallax_mas: Some(379.21),
            pm_ra: Some(-546.01),
            pm_de: Some(-1223.08),
            vmag: Some(-1.44),
            bt_mag: Some(-1.088),
            vt_mag: Some(-1.088),
            hp_mag: Some(-1.0876),
            b_v: Some(0.009),
            v_i: Some(-0.03),
            v_i_red: Some(-0.03),
            spectral_class_raw: Some("A0m...".into()),
            ..Default::default()
        },
        StarRecord {
            hip: Some(27989),
            parallax_mas: Some(7.63),
            vmag: Some(0.45),
            hp_mag: Some(0.3),
            b_v: Some(1.5),
            spectral_class_raw: Some("M2Ib".into()),
            variability_type: Some("SRC".into()),
            variability_period: Some(2335.0),
            ..Default::default()
        },
        StarRecord {
            hip: Some(24436),
            parallax_mas: Some(4.22),
            vmag: Some(0.18),
            hp_mag: Some(0.15),
            b_v: Some(-0.03),
            spectral_class_raw: Some("B8Ia:".into()),
            ..Default::default()
        },
        StarRecord {
            hip: Some(1),
            parallax_mas: Some(100.0),
            vmag: Some(4.83),
            hp_mag: Some(4.9),
            b_v: Some(0.65),
            spectral_class_raw: Some("G2V".into()),
            ..Default::default()
        },
        StarRecord {
            hip: Some(69673),
            parallax_mas: Some(88.85),
            vmag: Some(-0.05),
            hp_mag: Some(0.0),
            b_v: Some(1.239),
            spectral_class_raw: Some("K2IIIp".into()),
            ..Default::default()
        },
        StarRecord {
            hip: Some(2),
            parallax_mas: Some(0.0),
            vmag: Some(11.0),
            b_v: Some(0.0),
            spectral_class_raw: Some("DA".into()),
            ..Default::default()
        },
        StarRecord::default(),
        StarRecord {
            hip: Some(3),
            parallax_mas: Some(-2.5),
            vmag: Some(9.5),
            hp_mag: Some(9.6),
            spectral_class_raw: Some("g5".into()),
            ..Default::default()
        },
        StarRecord {
            hip: Some(4),
            parallax_mas: Some(1.0),
            vmag: Some(6.0),
            b_v: Some(-0.865),
            spectral_class_raw: Some("O9.5V".into()),
            ..Default::default()
        },
        StarRecord {
            hip: Some(5),
            parallax_mas: Some(40.0),
            vmag: Some(5.2),
            b_v: Some(0.45),
            spectral_class_raw: Some("F5".into()),
            ..Default::default()
        },
    ]
}

pub fn hips(catalog: &[hipcat::EnrichedStar]) -> Vec<Option<u32>> {
    catalog.iter().map(|s| s.record.hip).collect()
}
