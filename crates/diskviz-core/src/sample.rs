/// Built-in demo tree, shown when no snapshot is loaded.
use crate::model::DiskNode;

fn mib(value: f64) -> u64 {
    (value * 1024.0 * 1024.0) as u64
}

fn f(name: &str, size_mib: f64) -> DiskNode {
    DiskNode::file(name, mib(size_mib))
}

fn d(name: &str, children: Vec<DiskNode>) -> DiskNode {
    DiskNode::dir(name, children)
}

/// A small home-directory-like tree with three top-level groups.
pub fn sample_tree() -> DiskNode {
    let admin = d(
        "Admin",
        vec![
            d(
                "Documents",
                vec![
                    f("Project_Report.pdf", 5.0),
                    f("Budget.xlsx", 2.0),
                    f("Notes.txt", 0.1),
                    d(
                        "Old_Projects",
                        vec![f("2021_Summary.docx", 3.0), f("2020_Data.csv", 15.0)],
                    ),
                ],
            ),
            d(
                "Downloads",
                vec![
                    f("Installer_v2.dmg", 150.0),
                    f("Movie_Clip.mp4", 450.0),
                    f("Archive.zip", 200.0),
                    f("Funny_Cat.gif", 5.0),
                ],
            ),
            d(
                "Pictures",
                vec![
                    f("Vacation_01.jpg", 4.0),
                    f("Vacation_02.jpg", 4.2),
                    f("Profile_Pic.png", 2.0),
                    d(
                        "Raw_Photos",
                        vec![
                            f("IMG_1001.RAW", 25.0),
                            f("IMG_1002.RAW", 26.0),
                            f("IMG_1003.RAW", 24.0),
                        ],
                    ),
                ],
            ),
            d(
                "Music",
                vec![
                    f("Song_01.mp3", 8.0),
                    f("Song_02.mp3", 7.0),
                    f("Album_Cover.jpg", 1.0),
                ],
            ),
        ],
    );

    let applications = d(
        "Applications",
        vec![
            d("Browser", vec![f("Browser.app", 300.0), f("Helper.bin", 50.0)]),
            d(
                "Editor",
                vec![
                    f("Editor.app", 500.0),
                    d(
                        "Plugins",
                        vec![f("Plugin_A.dll", 20.0), f("Plugin_B.dll", 15.0)],
                    ),
                ],
            ),
        ],
    );

    let system = d(
        "System",
        vec![
            d(
                "Logs",
                vec![
                    f("sys.log", 120.0),
                    f("error.log", 45.0),
                    f("access.log", 200.0),
                ],
            ),
            d(
                "Cache",
                vec![f("temp_001.tmp", 10.0), f("temp_002.tmp", 12.0)],
            ),
        ],
    );

    d("root", vec![d("Users", vec![admin]), applications, system])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_three_groups() {
        let root = sample_tree();
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Users", "Applications", "System"]);
    }

    #[test]
    fn directory_sizes_are_sums() {
        let root = sample_tree();
        for (node, _) in root.walk().filter(|(n, _)| n.is_dir()) {
            let sum: u64 = node.children.iter().map(|c| c.size).sum();
            assert_eq!(node.size, sum, "{}", node.name);
        }
    }

    #[test]
    fn sample_file_count() {
        let files = sample_tree().walk().filter(|(n, _)| n.is_file()).count();
        assert_eq!(files, 28);
    }
}
