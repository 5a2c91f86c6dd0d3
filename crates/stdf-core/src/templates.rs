//! C2: the static, process-wide STDF and ATDF templates for all 25 record
//! types (spec §3 GLOSSARY; the list there omits MRR, but §4.5/§6 require
//! it for timestamp handling, so it is implemented — see DESIGN.md).
//!
//! Grounded on `trailer.rs`'s `GenericDataHeader`/`TrailerLayout` split: a
//! flat, ordered descriptor list plus O(1) name lookup, never a linked
//! graph (spec §9 Design Notes: "flat ordered vector... not a linked graph").

use crate::field_spec::{AtdfFieldSpec, FieldSpec, Sentinel};
use crate::primitive::ElemType;
use crate::record_type::RecordType;

const HEAD_SENTINEL: Sentinel = Sentinel::U(255);
const COUNT_SENTINEL: Sentinel = Sentinel::U(4_294_967_295);
const COORD_SENTINEL: Sentinel = Sentinel::I(-32768);

// ---------------------------------------------------------------------
// STDF templates (body fields only; the 3 header fields rec_len/rec_typ/
// rec_sub are consumed by the frame reader and never appear here, per
// spec §4.2).
// ---------------------------------------------------------------------

static FAR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("cpu_type", ElemType::U1),
    FieldSpec::scalar("stdf_ver", ElemType::U1),
];

static ATR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("mod_tim", ElemType::U4),
    FieldSpec::optional("cmd_line", ElemType::Cf),
];

static MIR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("setup_t", ElemType::U4),
    FieldSpec::scalar("start_t", ElemType::U4),
    FieldSpec::optional("stat_num", ElemType::U1),
    FieldSpec::optional("mode_cod", ElemType::Cf),
    FieldSpec::optional("rtst_cod", ElemType::Cf),
    FieldSpec::optional("prot_cod", ElemType::Cf),
    FieldSpec::optional("burn_tim", ElemType::U2),
    FieldSpec::optional("cmod_cod", ElemType::Cf),
    FieldSpec::optional("lot_id", ElemType::Cf),
    FieldSpec::optional("part_typ", ElemType::Cf),
    FieldSpec::optional("node_nam", ElemType::Cf),
    FieldSpec::optional("tstr_typ", ElemType::Cf),
    FieldSpec::optional("job_nam", ElemType::Cf),
    FieldSpec::optional("job_rev", ElemType::Cf),
    FieldSpec::optional("sblot_id", ElemType::Cf),
    FieldSpec::optional("oper_nam", ElemType::Cf),
    FieldSpec::optional("exec_typ", ElemType::Cf),
    FieldSpec::optional("exec_ver", ElemType::Cf),
    FieldSpec::optional("test_cod", ElemType::Cf),
    FieldSpec::optional("tst_temp", ElemType::Cf),
    FieldSpec::optional("user_txt", ElemType::Cf),
    FieldSpec::optional("aux_file", ElemType::Cf),
    FieldSpec::optional("pkg_typ", ElemType::Cf),
    FieldSpec::optional("famly_id", ElemType::Cf),
    FieldSpec::optional("date_cod", ElemType::Cf),
    FieldSpec::optional("facil_id", ElemType::Cf),
    FieldSpec::optional("floor_id", ElemType::Cf),
    FieldSpec::optional("proc_id", ElemType::Cf),
    FieldSpec::optional("oper_frq", ElemType::Cf),
    FieldSpec::optional("spec_nam", ElemType::Cf),
    FieldSpec::optional("spec_ver", ElemType::Cf),
    FieldSpec::optional("flow_id", ElemType::Cf),
    FieldSpec::optional("setup_id", ElemType::Cf),
    FieldSpec::optional("dsgn_rev", ElemType::Cf),
    FieldSpec::optional("eng_id", ElemType::Cf),
    FieldSpec::optional("rom_cod", ElemType::Cf),
    FieldSpec::optional("serl_num", ElemType::Cf),
    FieldSpec::optional("supr_nam", ElemType::Cf),
];

static MRR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("finish_t", ElemType::U4),
    FieldSpec::optional("disp_cod", ElemType::Cf),
    FieldSpec::optional("usr_desc", ElemType::Cf),
    FieldSpec::optional("exc_desc", ElemType::Cf),
];

static PCR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("part_cnt", ElemType::U4),
    FieldSpec::optional("rtst_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("abrt_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("good_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("func_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
];

static HBR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("hbin_num", ElemType::U2),
    FieldSpec::scalar("hbin_cnt", ElemType::U4),
    FieldSpec::optional("hbin_pf", ElemType::Cf),
    FieldSpec::optional("hbin_nam", ElemType::Cf),
];

static SBR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("sbin_num", ElemType::U2),
    FieldSpec::scalar("sbin_cnt", ElemType::U4),
    FieldSpec::optional("sbin_pf", ElemType::Cf),
    FieldSpec::optional("sbin_nam", ElemType::Cf),
];

static PMR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("pmr_indx", ElemType::U2),
    FieldSpec::optional("chan_typ", ElemType::U2),
    FieldSpec::optional("chan_nam", ElemType::Cf),
    FieldSpec::optional("phy_nam", ElemType::Cf),
    FieldSpec::optional("log_nam", ElemType::Cf),
    FieldSpec::optional("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::optional("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
];

static PGR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("grp_indx", ElemType::U2),
    FieldSpec::optional("grp_nam", ElemType::Cf),
    FieldSpec::scalar("indx_cnt", ElemType::U2),
    FieldSpec::array_of("pmr_indx", ElemType::U2, "indx_cnt"),
];

static PLR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("grp_cnt", ElemType::U2),
    FieldSpec::array_of("grp_indx", ElemType::U2, "grp_cnt"),
    FieldSpec::array_of("grp_mode", ElemType::U2, "grp_cnt"),
    FieldSpec::array_of("grp_radx", ElemType::U1, "grp_cnt"),
    FieldSpec::array_of("pgm_char", ElemType::Cf, "grp_cnt"),
    FieldSpec::array_of("rtn_char", ElemType::Cf, "grp_cnt"),
    FieldSpec::array_of("pgm_chal", ElemType::Cf, "grp_cnt"),
    FieldSpec::array_of("rtn_chal", ElemType::Cf, "grp_cnt"),
];

static RDR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("num_bins", ElemType::U2),
    FieldSpec::array_of("rtst_bin", ElemType::U2, "num_bins"),
];

static SDR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1),
    FieldSpec::scalar("site_grp", ElemType::U1),
    FieldSpec::scalar("site_cnt", ElemType::U1),
    FieldSpec::array_of("site_num", ElemType::U1, "site_cnt"),
    FieldSpec::optional("hand_typ", ElemType::Cf),
    FieldSpec::optional("hand_id", ElemType::Cf),
    FieldSpec::optional("card_typ", ElemType::Cf),
    FieldSpec::optional("card_id", ElemType::Cf),
    FieldSpec::optional("load_typ", ElemType::Cf),
    FieldSpec::optional("load_id", ElemType::Cf),
    FieldSpec::optional("dib_typ", ElemType::Cf),
    FieldSpec::optional("dib_id", ElemType::Cf),
    FieldSpec::optional("cabl_typ", ElemType::Cf),
    FieldSpec::optional("cabl_id", ElemType::Cf),
    FieldSpec::optional("cont_typ", ElemType::Cf),
    FieldSpec::optional("cont_id", ElemType::Cf),
    FieldSpec::optional("lasr_typ", ElemType::Cf),
    FieldSpec::optional("lasr_id", ElemType::Cf),
    FieldSpec::optional("extr_typ", ElemType::Cf),
    FieldSpec::optional("extr_id", ElemType::Cf),
];

static WIR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::optional("site_grp", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("start_t", ElemType::U4),
    FieldSpec::optional("wafer_id", ElemType::Cf),
];

static WRR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::optional("site_grp", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("finish_t", ElemType::U4),
    FieldSpec::scalar("part_cnt", ElemType::U4),
    FieldSpec::optional("rtst_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("abrt_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("good_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("func_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("wafer_id", ElemType::Cf),
    FieldSpec::optional("fabwf_id", ElemType::Cf),
    FieldSpec::optional("frame_id", ElemType::Cf),
    FieldSpec::optional("mask_id", ElemType::Cf),
    FieldSpec::optional("usr_desc", ElemType::Cf),
    FieldSpec::optional("exc_desc", ElemType::Cf),
];

static WCR_STDF: &[FieldSpec] = &[
    FieldSpec::optional("wafr_siz", ElemType::R4),
    FieldSpec::optional("die_ht", ElemType::R4),
    FieldSpec::optional("die_wid", ElemType::R4),
    FieldSpec::optional("wf_units", ElemType::U1),
    FieldSpec::optional("wf_flat", ElemType::Cf),
    FieldSpec::optional("center_x", ElemType::I2).with_sentinel(COORD_SENTINEL),
    FieldSpec::optional("center_y", ElemType::I2).with_sentinel(COORD_SENTINEL),
    FieldSpec::optional("pos_x", ElemType::Cf),
    FieldSpec::optional("pos_y", ElemType::Cf),
];

static PIR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
];

static PRR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("part_flg", ElemType::U1),
    FieldSpec::scalar("num_test", ElemType::U2),
    FieldSpec::scalar("hard_bin", ElemType::U2),
    FieldSpec::optional("soft_bin", ElemType::U2).with_sentinel(Sentinel::U(65535)),
    FieldSpec::optional("x_coord", ElemType::I2).with_sentinel(COORD_SENTINEL),
    FieldSpec::optional("y_coord", ElemType::I2).with_sentinel(COORD_SENTINEL),
    FieldSpec::scalar("test_t", ElemType::U4),
    FieldSpec::optional("part_id", ElemType::Cf),
    FieldSpec::optional("part_txt", ElemType::Cf),
];

static TSR_STDF: &[FieldSpec] = &[
    FieldSpec::optional("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::optional("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::optional("test_typ", ElemType::Cf),
    FieldSpec::scalar("test_num", ElemType::U4),
    FieldSpec::optional("exec_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("fail_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("alrm_cnt", ElemType::U4).with_sentinel(COUNT_SENTINEL),
    FieldSpec::optional("test_nam", ElemType::Cf),
    FieldSpec::optional("seq_name", ElemType::Cf),
    FieldSpec::optional("test_lbl", ElemType::Cf),
    FieldSpec::optional("opt_flag", ElemType::U1),
    FieldSpec::optional("test_tim", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("test_min", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("test_max", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("tst_sums", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("tst_sqrs", ElemType::R4).with_sentinel(Sentinel::F32Nan),
];

static PTR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("test_num", ElemType::U4),
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("test_flg", ElemType::U1),
    FieldSpec::scalar("parm_flg", ElemType::U1),
    FieldSpec::optional("result", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("test_txt", ElemType::Cf),
    FieldSpec::optional("alarm_id", ElemType::Cf),
    FieldSpec::optional("opt_flag", ElemType::U1),
    FieldSpec::optional("res_scal", ElemType::I1),
    FieldSpec::optional("llm_scal", ElemType::I1),
    FieldSpec::optional("hlm_scal", ElemType::I1),
    FieldSpec::optional("lo_limit", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("hi_limit", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("units", ElemType::Cf),
    FieldSpec::optional("c_resfmt", ElemType::Cf),
    FieldSpec::optional("c_llmfmt", ElemType::Cf),
    FieldSpec::optional("c_hlmfmt", ElemType::Cf),
    FieldSpec::optional("lo_spec", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("hi_spec", ElemType::R4).with_sentinel(Sentinel::F32Nan),
];

static MPR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("test_num", ElemType::U4),
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("test_flg", ElemType::U1),
    FieldSpec::scalar("parm_flg", ElemType::U1),
    FieldSpec::scalar("rtn_icnt", ElemType::U2),
    FieldSpec::scalar("rslt_cnt", ElemType::U2),
    FieldSpec::array_of("rtn_stat", ElemType::Nibble, "rtn_icnt"),
    FieldSpec::array_of("rtn_rslt", ElemType::R4, "rslt_cnt"),
    FieldSpec::optional("test_txt", ElemType::Cf),
    FieldSpec::optional("alarm_id", ElemType::Cf),
    FieldSpec::optional("opt_flag", ElemType::U1),
    FieldSpec::optional("res_scal", ElemType::I1),
    FieldSpec::optional("llm_scal", ElemType::I1),
    FieldSpec::optional("hlm_scal", ElemType::I1),
    FieldSpec::optional("lo_limit", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("hi_limit", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("start_in", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("incr_in", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::array_of("rtn_indx", ElemType::U2, "rtn_icnt"),
    FieldSpec::optional("units", ElemType::Cf),
    FieldSpec::optional("units_in", ElemType::Cf),
    FieldSpec::optional("c_resfmt", ElemType::Cf),
    FieldSpec::optional("c_llmfmt", ElemType::Cf),
    FieldSpec::optional("c_hlmfmt", ElemType::Cf),
    FieldSpec::optional("lo_spec", ElemType::R4).with_sentinel(Sentinel::F32Nan),
    FieldSpec::optional("hi_spec", ElemType::R4).with_sentinel(Sentinel::F32Nan),
];

static FTR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("test_num", ElemType::U4),
    FieldSpec::scalar("head_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("site_num", ElemType::U1).with_sentinel(HEAD_SENTINEL),
    FieldSpec::scalar("test_flg", ElemType::U1),
    FieldSpec::optional("opt_flag", ElemType::U1),
    FieldSpec::optional("cycl_cnt", ElemType::U4),
    FieldSpec::optional("rel_vadr", ElemType::U4),
    FieldSpec::optional("rept_cnt", ElemType::U4),
    FieldSpec::optional("num_fail", ElemType::U4),
    FieldSpec::optional("xfail_ad", ElemType::I4),
    FieldSpec::optional("yfail_ad", ElemType::I4),
    FieldSpec::optional("vect_off", ElemType::I2),
    FieldSpec::scalar("rtn_icnt", ElemType::U2),
    FieldSpec::scalar("pgm_icnt", ElemType::U2),
    FieldSpec::array_of("rtn_indx", ElemType::U2, "rtn_icnt"),
    FieldSpec::array_of("rtn_stat", ElemType::Nibble, "rtn_icnt"),
    FieldSpec::array_of("pgm_indx", ElemType::U2, "pgm_icnt"),
    FieldSpec::array_of("pgm_stat", ElemType::Nibble, "pgm_icnt"),
    FieldSpec::optional("fail_pin", ElemType::Dn),
    FieldSpec::optional("vect_nam", ElemType::Cf),
    FieldSpec::optional("time_set", ElemType::Cf),
    FieldSpec::optional("op_code", ElemType::Cf),
    FieldSpec::optional("test_txt", ElemType::Cf),
    FieldSpec::optional("alarm_id", ElemType::Cf),
    FieldSpec::optional("program_txt", ElemType::Cf),
    FieldSpec::optional("rslt_txt", ElemType::Cf),
    FieldSpec::optional("patg_num", ElemType::U1),
    FieldSpec::optional("spin_map", ElemType::Dn),
];

static BPS_STDF: &[FieldSpec] = &[FieldSpec::optional("seq_name", ElemType::Cf)];

static EPS_STDF: &[FieldSpec] = &[];

static GDR_STDF: &[FieldSpec] = &[
    FieldSpec::scalar("fld_cnt", ElemType::U2),
    FieldSpec::array_of("gen_data", ElemType::Vn, "fld_cnt"),
];

static DTR_STDF: &[FieldSpec] = &[FieldSpec::optional("text_dat", ElemType::Cf)];

/// The STDF body-field template for a record type (spec §4.2).
pub fn stdf_template(rt: RecordType) -> &'static [FieldSpec] {
    match rt {
        RecordType::Far => FAR_STDF,
        RecordType::Atr => ATR_STDF,
        RecordType::Mir => MIR_STDF,
        RecordType::Mrr => MRR_STDF,
        RecordType::Pcr => PCR_STDF,
        RecordType::Hbr => HBR_STDF,
        RecordType::Sbr => SBR_STDF,
        RecordType::Pmr => PMR_STDF,
        RecordType::Pgr => PGR_STDF,
        RecordType::Plr => PLR_STDF,
        RecordType::Rdr => RDR_STDF,
        RecordType::Sdr => SDR_STDF,
        RecordType::Wir => WIR_STDF,
        RecordType::Wrr => WRR_STDF,
        RecordType::Wcr => WCR_STDF,
        RecordType::Pir => PIR_STDF,
        RecordType::Prr => PRR_STDF,
        RecordType::Tsr => TSR_STDF,
        RecordType::Ptr => PTR_STDF,
        RecordType::Mpr => MPR_STDF,
        RecordType::Ftr => FTR_STDF,
        RecordType::Bps => BPS_STDF,
        RecordType::Eps => EPS_STDF,
        RecordType::Gdr => GDR_STDF,
        RecordType::Dtr => DTR_STDF,
    }
}

// ---------------------------------------------------------------------
// ATDF templates (field order, source, requiredness).
// ---------------------------------------------------------------------

static FAR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::derived("data_file_type").required(true),
    AtdfFieldSpec::derived("atdf_version").required(true),
];

static ATR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("modification_timestamp", "mod_tim").required(true),
    AtdfFieldSpec::field("command_line", "cmd_line"),
];

static MIR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("setup_time", "setup_t").required(true),
    AtdfFieldSpec::field("start_time", "start_t").required(true),
    AtdfFieldSpec::field("station_number", "stat_num"),
    AtdfFieldSpec::field("mode_code", "mode_cod"),
    AtdfFieldSpec::field("retest_code", "rtst_cod"),
    AtdfFieldSpec::field("protection_code", "prot_cod"),
    AtdfFieldSpec::field("burn_in_time", "burn_tim"),
    AtdfFieldSpec::field("command_mode_code", "cmod_cod"),
    AtdfFieldSpec::field("lot_id", "lot_id"),
    AtdfFieldSpec::field("part_type", "part_typ"),
    AtdfFieldSpec::field("node_name", "node_nam"),
    AtdfFieldSpec::field("tester_type", "tstr_typ"),
    AtdfFieldSpec::field("job_name", "job_nam"),
    AtdfFieldSpec::field("job_revision", "job_rev"),
    AtdfFieldSpec::field("sublot_id", "sblot_id"),
    AtdfFieldSpec::field("operator_name", "oper_nam"),
    AtdfFieldSpec::field("exec_type", "exec_typ"),
    AtdfFieldSpec::field("exec_version", "exec_ver"),
    AtdfFieldSpec::field("test_code", "test_cod"),
    AtdfFieldSpec::field("test_temperature", "tst_temp"),
    AtdfFieldSpec::field("user_text", "user_txt"),
    AtdfFieldSpec::field("aux_file", "aux_file"),
    AtdfFieldSpec::field("package_type", "pkg_typ"),
    AtdfFieldSpec::field("family_id", "famly_id"),
    AtdfFieldSpec::field("date_code", "date_cod"),
    AtdfFieldSpec::field("facility_id", "facil_id"),
    AtdfFieldSpec::field("floor_id", "floor_id"),
    AtdfFieldSpec::field("process_id", "proc_id"),
    AtdfFieldSpec::field("operation_frequency", "oper_frq"),
    AtdfFieldSpec::field("test_spec_name", "spec_nam"),
    AtdfFieldSpec::field("test_spec_version", "spec_ver"),
    AtdfFieldSpec::field("flow_id", "flow_id"),
    AtdfFieldSpec::field("setup_id", "setup_id"),
    AtdfFieldSpec::field("design_revision", "dsgn_rev"),
    AtdfFieldSpec::field("engineer_lot_id", "eng_id"),
    AtdfFieldSpec::field("rom_code", "rom_cod"),
    AtdfFieldSpec::field("serial_number", "serl_num"),
    AtdfFieldSpec::field("supervisor_name", "supr_nam"),
];

static MRR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("finish_time", "finish_t").required(true),
    AtdfFieldSpec::field("disposition_code", "disp_cod"),
    AtdfFieldSpec::field("user_description", "usr_desc"),
    AtdfFieldSpec::field("exception_description", "exc_desc"),
];

static PCR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num"),
    AtdfFieldSpec::field("site_number", "site_num"),
    AtdfFieldSpec::field("part_count", "part_cnt").required(true),
    AtdfFieldSpec::field("retest_count", "rtst_cnt"),
    AtdfFieldSpec::field("abort_count", "abrt_cnt"),
    AtdfFieldSpec::field("good_count", "good_cnt"),
    AtdfFieldSpec::field("functional_count", "func_cnt"),
];

static HBR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num"),
    AtdfFieldSpec::field("site_number", "site_num"),
    AtdfFieldSpec::field("hbin_number", "hbin_num").required(true),
    AtdfFieldSpec::field("hbin_count", "hbin_cnt").required(true),
    AtdfFieldSpec::field("hbin_pass_fail", "hbin_pf"),
    AtdfFieldSpec::field("hbin_name", "hbin_nam"),
];

static SBR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num"),
    AtdfFieldSpec::field("site_number", "site_num"),
    AtdfFieldSpec::field("sbin_number", "sbin_num").required(true),
    AtdfFieldSpec::field("sbin_count", "sbin_cnt").required(true),
    AtdfFieldSpec::field("sbin_pass_fail", "sbin_pf"),
    AtdfFieldSpec::field("sbin_name", "sbin_nam"),
];

static PMR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("pmr_index", "pmr_indx").required(true),
    AtdfFieldSpec::field("channel_type", "chan_typ"),
    AtdfFieldSpec::field("channel_name", "chan_nam"),
    AtdfFieldSpec::field("physical_name", "phy_nam"),
    AtdfFieldSpec::field("logical_name", "log_nam"),
    AtdfFieldSpec::field("head_number", "head_num"),
    AtdfFieldSpec::field("site_number", "site_num"),
];

static PGR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("group_index", "grp_indx").required(true),
    AtdfFieldSpec::field("group_name", "grp_nam"),
    AtdfFieldSpec::field("pmr_indexes", "pmr_indx"),
];

static PLR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("group_indexes", "grp_indx").required(true),
    AtdfFieldSpec::field("mode_array", "grp_mode"),
    AtdfFieldSpec::field("radix_array", "grp_radx"),
    AtdfFieldSpec::pair("programmed_state", "pgm_char", "pgm_chal"),
    AtdfFieldSpec::pair("returned_state", "rtn_char", "rtn_chal"),
];

static RDR_ATDF: &[AtdfFieldSpec] = &[AtdfFieldSpec::field("retest_bins", "rtst_bin")];

static SDR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_group", "site_grp").required(true),
    AtdfFieldSpec::field("site_count", "site_cnt").required(true),
    AtdfFieldSpec::field("site_numbers", "site_num"),
    AtdfFieldSpec::field("handler_type", "hand_typ"),
    AtdfFieldSpec::field("handler_id", "hand_id"),
    AtdfFieldSpec::field("card_type", "card_typ"),
    AtdfFieldSpec::field("card_id", "card_id"),
    AtdfFieldSpec::field("load_board_type", "load_typ"),
    AtdfFieldSpec::field("load_board_id", "load_id"),
    AtdfFieldSpec::field("dib_board_type", "dib_typ"),
    AtdfFieldSpec::field("dib_board_id", "dib_id"),
    AtdfFieldSpec::field("cable_type", "cabl_typ"),
    AtdfFieldSpec::field("cable_id", "cabl_id"),
    AtdfFieldSpec::field("contactor_type", "cont_typ"),
    AtdfFieldSpec::field("contactor_id", "cont_id"),
    AtdfFieldSpec::field("laser_type", "lasr_typ"),
    AtdfFieldSpec::field("laser_id", "lasr_id"),
    AtdfFieldSpec::field("extra_type", "extr_typ"),
    AtdfFieldSpec::field("extra_id", "extr_id"),
];

static WIR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_group", "site_grp"),
    AtdfFieldSpec::field("start_time", "start_t").required(true),
    AtdfFieldSpec::field("wafer_id", "wafer_id"),
    AtdfFieldSpec::derived("w_id"),
];

static WRR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_group", "site_grp"),
    AtdfFieldSpec::field("finish_time", "finish_t").required(true),
    AtdfFieldSpec::field("part_count", "part_cnt").required(true),
    AtdfFieldSpec::field("retest_count", "rtst_cnt"),
    AtdfFieldSpec::field("abort_count", "abrt_cnt"),
    AtdfFieldSpec::field("good_count", "good_cnt"),
    AtdfFieldSpec::field("functional_count", "func_cnt"),
    AtdfFieldSpec::field("wafer_id", "wafer_id"),
    AtdfFieldSpec::field("fab_wafer_id", "fabwf_id"),
    AtdfFieldSpec::field("frame_id", "frame_id"),
    AtdfFieldSpec::field("mask_id", "mask_id"),
    AtdfFieldSpec::field("user_description", "usr_desc"),
    AtdfFieldSpec::field("exception_description", "exc_desc"),
    AtdfFieldSpec::derived("w_id"),
];

static WCR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("wafer_size", "wafr_siz"),
    AtdfFieldSpec::field("die_height", "die_ht"),
    AtdfFieldSpec::field("die_width", "die_wid"),
    AtdfFieldSpec::field("wafer_units", "wf_units"),
    AtdfFieldSpec::field("wafer_flat", "wf_flat"),
    AtdfFieldSpec::field("center_x", "center_x"),
    AtdfFieldSpec::field("center_y", "center_y"),
    AtdfFieldSpec::field("pos_x", "pos_x"),
    AtdfFieldSpec::field("pos_y", "pos_y"),
];

static PIR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_number", "site_num").required(true),
    AtdfFieldSpec::derived("w_id"),
    AtdfFieldSpec::derived("p_id"),
];

static PRR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_number", "site_num").required(true),
    AtdfFieldSpec::field("pass_fail_code", "part_flg"),
    AtdfFieldSpec::field("retest_code", "part_flg"),
    AtdfFieldSpec::field("abort_code", "part_flg"),
    AtdfFieldSpec::field("test_count", "num_test").required(true),
    AtdfFieldSpec::field("hard_bin", "hard_bin").required(true),
    AtdfFieldSpec::field("soft_bin", "soft_bin"),
    AtdfFieldSpec::field("x_coord", "x_coord"),
    AtdfFieldSpec::field("y_coord", "y_coord"),
    AtdfFieldSpec::field("test_time", "test_t").required(true),
    AtdfFieldSpec::field("part_id", "part_id"),
    AtdfFieldSpec::field("part_text", "part_txt"),
    AtdfFieldSpec::derived("w_id"),
    AtdfFieldSpec::derived("p_id"),
];

static TSR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("head_number", "head_num"),
    AtdfFieldSpec::field("site_number", "site_num"),
    AtdfFieldSpec::field("test_type", "test_typ"),
    AtdfFieldSpec::field("test_number", "test_num").required(true),
    AtdfFieldSpec::field("exec_count", "exec_cnt"),
    AtdfFieldSpec::field("fail_count", "fail_cnt"),
    AtdfFieldSpec::field("alarm_count", "alrm_cnt"),
    AtdfFieldSpec::field("test_name", "test_nam"),
    AtdfFieldSpec::field("sequencer_name", "seq_name"),
    AtdfFieldSpec::field("test_label", "test_lbl"),
    AtdfFieldSpec::field("test_time", "test_tim"),
    AtdfFieldSpec::field("test_min", "test_min"),
    AtdfFieldSpec::field("test_max", "test_max"),
    AtdfFieldSpec::field("test_sum", "tst_sums"),
    AtdfFieldSpec::field("test_sum_of_squares", "tst_sqrs"),
];

static PTR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("test_number", "test_num").required(true),
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_number", "site_num").required(true),
    AtdfFieldSpec::pair("pass_fail_flag", "test_flg", "parm_flg"),
    AtdfFieldSpec::pair("alarm_flags", "test_flg", "parm_flg"),
    AtdfFieldSpec::field("test_result", "result"),
    AtdfFieldSpec::field("test_text", "test_txt"),
    AtdfFieldSpec::field("alarm_id", "alarm_id"),
    AtdfFieldSpec::field("limit_compare", "opt_flag"),
    AtdfFieldSpec::field("result_scale", "res_scal"),
    AtdfFieldSpec::field("low_limit_scale", "llm_scal"),
    AtdfFieldSpec::field("high_limit_scale", "hlm_scal"),
    AtdfFieldSpec::field("low_limit", "lo_limit"),
    AtdfFieldSpec::field("high_limit", "hi_limit"),
    AtdfFieldSpec::field("units", "units"),
    AtdfFieldSpec::field("result_format", "c_resfmt"),
    AtdfFieldSpec::field("low_limit_format", "c_llmfmt"),
    AtdfFieldSpec::field("high_limit_format", "c_hlmfmt"),
    AtdfFieldSpec::field("low_spec", "lo_spec"),
    AtdfFieldSpec::field("high_spec", "hi_spec"),
    AtdfFieldSpec::derived("w_id"),
    AtdfFieldSpec::derived("p_id"),
];

static MPR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("test_number", "test_num").required(true),
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_number", "site_num").required(true),
    AtdfFieldSpec::pair("pass_fail_flag", "test_flg", "parm_flg"),
    AtdfFieldSpec::pair("alarm_flags", "test_flg", "parm_flg"),
    AtdfFieldSpec::field("return_state", "rtn_stat"),
    AtdfFieldSpec::field("return_result", "rtn_rslt"),
    AtdfFieldSpec::field("test_text", "test_txt"),
    AtdfFieldSpec::field("alarm_id", "alarm_id"),
    AtdfFieldSpec::field("limit_compare", "opt_flag"),
    AtdfFieldSpec::field("result_scale", "res_scal"),
    AtdfFieldSpec::field("low_limit_scale", "llm_scal"),
    AtdfFieldSpec::field("high_limit_scale", "hlm_scal"),
    AtdfFieldSpec::field("low_limit", "lo_limit"),
    AtdfFieldSpec::field("high_limit", "hi_limit"),
    AtdfFieldSpec::field("start_input", "start_in"),
    AtdfFieldSpec::field("increment_input", "incr_in"),
    AtdfFieldSpec::field("return_index", "rtn_indx"),
    AtdfFieldSpec::field("units", "units"),
    AtdfFieldSpec::field("input_units", "units_in"),
    AtdfFieldSpec::field("result_format", "c_resfmt"),
    AtdfFieldSpec::field("low_limit_format", "c_llmfmt"),
    AtdfFieldSpec::field("high_limit_format", "c_hlmfmt"),
    AtdfFieldSpec::field("low_spec", "lo_spec"),
    AtdfFieldSpec::field("high_spec", "hi_spec"),
    AtdfFieldSpec::derived("w_id"),
    AtdfFieldSpec::derived("p_id"),
];

static FTR_ATDF: &[AtdfFieldSpec] = &[
    AtdfFieldSpec::field("test_number", "test_num").required(true),
    AtdfFieldSpec::field("head_number", "head_num").required(true),
    AtdfFieldSpec::field("site_number", "site_num").required(true),
    AtdfFieldSpec::field("pass_fail_flag", "test_flg"),
    AtdfFieldSpec::field("alarm_flags", "test_flg"),
    AtdfFieldSpec::field("cycle_count", "cycl_cnt"),
    AtdfFieldSpec::field("relative_address", "rel_vadr"),
    AtdfFieldSpec::field("repeat_count", "rept_cnt"),
    AtdfFieldSpec::field("fail_count", "num_fail"),
    AtdfFieldSpec::field("xfail_address", "xfail_ad"),
    AtdfFieldSpec::field("yfail_address", "yfail_ad"),
    AtdfFieldSpec::field("vector_offset", "vect_off"),
    AtdfFieldSpec::field("return_index", "rtn_indx"),
    AtdfFieldSpec::field("return_state", "rtn_stat"),
    AtdfFieldSpec::field("program_index", "pgm_indx"),
    AtdfFieldSpec::field("program_state", "pgm_stat"),
    AtdfFieldSpec::field("failing_pin", "fail_pin"),
    AtdfFieldSpec::field("vector_name", "vect_nam"),
    AtdfFieldSpec::field("time_set", "time_set"),
    AtdfFieldSpec::field("op_code", "op_code"),
    AtdfFieldSpec::field("test_text", "test_txt"),
    AtdfFieldSpec::field("alarm_id", "alarm_id"),
    AtdfFieldSpec::field("program_text", "program_txt"),
    AtdfFieldSpec::field("result_text", "rslt_txt"),
    AtdfFieldSpec::field("pattern_gen_number", "patg_num"),
    AtdfFieldSpec::field("spin_map", "spin_map"),
    AtdfFieldSpec::derived("w_id"),
    AtdfFieldSpec::derived("p_id"),
];

static BPS_ATDF: &[AtdfFieldSpec] = &[AtdfFieldSpec::field("sequencer_name", "seq_name")];

static EPS_ATDF: &[AtdfFieldSpec] = &[];

static GDR_ATDF: &[AtdfFieldSpec] = &[AtdfFieldSpec::field("generic_data", "gen_data")];

static DTR_ATDF: &[AtdfFieldSpec] = &[AtdfFieldSpec::field("text", "text_dat")];

/// The ATDF field template for a record type (spec §4.2, §3 invariant 5).
pub fn atdf_template(rt: RecordType) -> &'static [AtdfFieldSpec] {
    match rt {
        RecordType::Far => FAR_ATDF,
        RecordType::Atr => ATR_ATDF,
        RecordType::Mir => MIR_ATDF,
        RecordType::Mrr => MRR_ATDF,
        RecordType::Pcr => PCR_ATDF,
        RecordType::Hbr => HBR_ATDF,
        RecordType::Sbr => SBR_ATDF,
        RecordType::Pmr => PMR_ATDF,
        RecordType::Pgr => PGR_ATDF,
        RecordType::Plr => PLR_ATDF,
        RecordType::Rdr => RDR_ATDF,
        RecordType::Sdr => SDR_ATDF,
        RecordType::Wir => WIR_ATDF,
        RecordType::Wrr => WRR_ATDF,
        RecordType::Wcr => WCR_ATDF,
        RecordType::Pir => PIR_ATDF,
        RecordType::Prr => PRR_ATDF,
        RecordType::Tsr => TSR_ATDF,
        RecordType::Ptr => PTR_ATDF,
        RecordType::Mpr => MPR_ATDF,
        RecordType::Ftr => FTR_ATDF,
        RecordType::Bps => BPS_ATDF,
        RecordType::Eps => EPS_ATDF,
        RecordType::Gdr => GDR_ATDF,
        RecordType::Dtr => DTR_ATDF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_record_type_has_both_templates() {
        for rt in RecordType::ALL {
            let _ = stdf_template(rt);
            let _ = atdf_template(rt);
        }
    }

    #[test]
    fn test_len_ref_points_to_earlier_field() {
        // spec §3 invariant 2: a field's `ref` must appear earlier in the
        // template's declaration order.
        for rt in RecordType::ALL {
            let tmpl = stdf_template(rt);
            for (i, f) in tmpl.iter().enumerate() {
                if let Some(r) = f.len_ref {
                    let earlier = tmpl[..i].iter().any(|g| g.name == r);
                    assert!(earlier, "{:?}.{}: ref '{}' not declared earlier", rt, f.name, r);
                }
            }
        }
    }

    #[test]
    fn test_atdf_field_sources_exist_in_stdf_template() {
        use crate::field_spec::AtdfSource;
        for rt in RecordType::ALL {
            let stdf_names: Vec<&str> = stdf_template(rt).iter().map(|f| f.name).collect();
            for f in atdf_template(rt) {
                match f.source {
                    AtdfSource::Field(name) => {
                        assert!(
                            stdf_names.contains(&name),
                            "{:?}.{}: source '{}' missing from STDF template",
                            rt,
                            f.name,
                            name
                        );
                    }
                    AtdfSource::Pair(a, b) => {
                        assert!(stdf_names.contains(&a) && stdf_names.contains(&b));
                    }
                    AtdfSource::None => {}
                }
            }
        }
    }
}
