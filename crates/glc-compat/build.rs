use std::env;
use std::fs;
use std::path::PathBuf;

use glc_symver::{
    Backend, ENV_BACKEND, ENV_BASELINE, ENV_EXPORT_ALIASES, LinkPlan, ShimConfig,
};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in [ENV_BASELINE, ENV_BACKEND, ENV_EXPORT_ALIASES] {
        println!("cargo:rerun-if-env-changed={key}");
    }
    println!("cargo::rustc-check-cfg=cfg(glc_legacy_glibc)");
    println!("cargo::rustc-check-cfg=cfg(glc_export_aliases)");

    let mut config = ShimConfig::from_lookup(|key| env::var(key).ok())
        .unwrap_or_else(|err| panic!("invalid shim configuration: {err}"));
    if env::var_os("CARGO_FEATURE_PORTABLE").is_some() {
        config.backend_override = Some(Backend::Portable);
    }
    let plan = LinkPlan::resolve(&config)
        .unwrap_or_else(|err| panic!("cannot bind math symbols for this target: {err}"));

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    fs::write(out_dir.join("link_plan.rs"), plan.render_manifest()).expect("write link plan");
    fs::write(out_dir.join("glc_compat.map"), plan.render_version_script())
        .expect("write version script");

    if plan.backend == Backend::LegacyGlibc {
        let forwarding = plan
            .render_forwarding_asm()
            .unwrap_or_else(|err| panic!("cannot render .symver directives: {err}"));
        fs::write(out_dir.join("forwarding.s"), forwarding).expect("write forwarding asm");
        println!("cargo:rustc-cfg=glc_legacy_glibc");
    }

    if plan.export_aliases {
        fs::write(out_dir.join("aliases.s"), plan.render_alias_asm()).expect("write alias asm");
        println!("cargo:rustc-cfg=glc_export_aliases");
    }
}
