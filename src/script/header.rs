use crate::resources::Resources;

/// Render the preamble: shebang, exports, module unloads, module loads, sources
///
/// Every group ends with a blank line, empty or not, so the script layout never shifts.
pub fn compose_header(res: &Resources) -> String {
    let mut ret = String::from("#!/bin/bash\n\n");

    for (name, value) in &res.envs {
        ret.push_str(&format!("export {name}={value}\n"));
    }
    ret.push('\n');
    for module in &res.module_unload_list {
        ret.push_str(&format!("module unload {module}\n"));
    }
    ret.push('\n');
    for module in &res.module_list {
        ret.push_str(&format!("module load {module}\n"));
    }
    ret.push('\n');
    for script in &res.source_list {
        ret.push_str(&format!("source {script}\n"));
    }
    ret.push('\n');

    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_groups_still_get_blank_lines() {
        assert_eq!(compose_header(&Resources::default()), "#!/bin/bash\n\n\n\n\n\n");
    }

    #[test]
    fn exports_follow_insertion_order() {
        let res = Resources {
            envs: vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string()),
            ],
            ..Resources::default()
        };
        let header = compose_header(&res);
        let a = header.find("export A=1").unwrap();
        let b = header.find("export B=2").unwrap();
        assert!(a < b);
    }

    #[test]
    fn full_header() {
        let res = Resources {
            envs: vec![("PATH".to_string(), "/opt/bin:$PATH".to_string())],
            module_unload_list: strings(&["intel", "mkl"]),
            module_list: strings(&["gcc/12", "openmpi/4"]),
            source_list: strings(&["~/venv/bin/activate"]),
            ..Resources::default()
        };
        let expected = "#!/bin/bash\n\n\
                        export PATH=/opt/bin:$PATH\n\n\
                        module unload intel\nmodule unload mkl\n\n\
                        module load gcc/12\nmodule load openmpi/4\n\n\
                        source ~/venv/bin/activate\n\n";
        assert_eq!(compose_header(&res), expected);
    }
}
