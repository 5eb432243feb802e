//! The fixed records the dashboard starts with.
//!
//! Friendships are listed once per pair and mirrored onto both users.

use chrono::{DateTime, NaiveDate, Utc};
use ustr::Ustr;

use crate::records::{
    Deletion, Feedback, Linkup, LinkupStatus, ReadState, Report, ReportTarget, StaffMember,
    StaffRole, Suspension, User, UserStatus, Verification, VerificationStatus,
};

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

const FRIENDSHIPS: &[(&str, &str)] = &[
    ("u-1", "u-2"),
    ("u-1", "u-3"),
    ("u-1", "u-6"),
    ("u-2", "u-4"),
    ("u-3", "u-5"),
    ("u-4", "u-8"),
    ("u-6", "u-9"),
    ("u-7", "u-10"),
];

fn friends_of(id: &str) -> Vec<Ustr> {
    FRIENDSHIPS
        .iter()
        .filter_map(|&(a, b)| {
            if a == id {
                Some(Ustr::from(b))
            } else if b == id {
                Some(Ustr::from(a))
            } else {
                None
            }
        })
        .collect()
}

pub fn users() -> Vec<User> {
    let user = |id: &str, name: &str, username: &str, age: u32, gender: &str, city: &str| {
        User::builder()
            .id(id)
            .name(name)
            .username(username)
            .email(format!("{username}@example.com"))
            .age(age)
            .gender(gender)
            .city(city)
            .friend_ids(friends_of(id))
    };

    vec![
        user("u-1", "Amara Okafor", "amara", 28, "female", "Lagos")
            .joined_at(at(2023, 2, 14, 10))
            .last_active(at(2024, 5, 30, 18))
            .verified(true)
            .linkups_created(3)
            .build(),
        user("u-2", "Jonas Weber", "jonas", 45, "male", "Berlin")
            .joined_at(at(2023, 4, 2, 9))
            .last_active(at(2024, 5, 29, 8))
            .linkups_created(2)
            .build(),
        user("u-3", "Émilie Laurent", "emilie", 19, "female", "Lyon")
            .joined_at(at(2023, 6, 21, 15))
            .last_active(at(2024, 5, 31, 21))
            .verified(true)
            .linkups_created(1)
            .build(),
        user("u-4", "Diego Ramírez", "diego", 62, "male", "Madrid")
            .joined_at(at(2023, 8, 9, 12))
            .linkups_created(1)
            .build(),
        user("u-5", "Sakura Ito", "sakura", 33, "female", "Osaka")
            .joined_at(at(2023, 9, 30, 7))
            .last_active(at(2024, 5, 12, 11))
            .build(),
        user("u-6", "Liam O'Brien", "liam", 24, "male", "Dublin")
            .joined_at(at(2023, 11, 3, 19))
            .last_active(at(2024, 5, 28, 22))
            .linkups_created(1)
            .build(),
        user("u-7", "Noor Haddad", "noor", 37, "female", "Amman")
            .joined_at(at(2024, 1, 17, 13))
            .last_active(at(2024, 4, 2, 10))
            .status(UserStatus::Suspended(Suspension {
                reason: "Repeated no-shows at paid linkups".to_owned(),
                by: "Linkup Admin".to_owned(),
                at: at(2024, 4, 3, 9),
            }))
            .build(),
        user("u-8", "Mateo Rossi", "mateo", 41, "male", "Milan")
            .joined_at(at(2024, 2, 8, 16))
            .last_active(at(2024, 3, 1, 12))
            .status(UserStatus::Suspended(Suspension {
                reason: "Spam invitations".to_owned(),
                by: "Linkup Admin".to_owned(),
                at: at(2024, 3, 2, 14),
            }))
            .build(),
        user("u-9", "Freya Nilsson", "freya", 29, "female", "Oslo")
            .joined_at(at(2024, 3, 12, 8))
            .status(UserStatus::Deleted(Deletion {
                reason: "Requested account deletion".to_owned(),
                by: "Linkup Admin".to_owned(),
                at: at(2024, 5, 1, 10),
            }))
            .build(),
        user("u-10", "Kwame Mensah", "kwame", 52, "male", "Accra")
            .joined_at(at(2024, 4, 25, 17))
            .last_active(at(2024, 5, 30, 7))
            .build(),
    ]
}

pub fn linkups() -> Vec<Linkup> {
    let linkup = |id: &str, title: &str, creator_id: &str, creator: &str, category: &str| {
        Linkup::builder()
            .id(id)
            .title(title)
            .creator_id(creator_id)
            .creator_name(creator)
            .category(category)
    };

    vec![
        linkup("l-1", "Sunrise run on the lagoon", "u-1", "Amara Okafor", "Sports")
            .location("Lagos")
            .starts_at(at(2024, 6, 8, 6))
            .created_at(at(2024, 5, 20, 12))
            .attendees(12)
            .capacity(20)
            .build(),
        linkup("l-2", "Board game night", "u-2", "Jonas Weber", "Games")
            .location("Berlin")
            .starts_at(at(2024, 6, 1, 19))
            .created_at(at(2024, 5, 10, 9))
            .attendees(8)
            .capacity(8)
            .price(5.0)
            .status(LinkupStatus::Happening)
            .build(),
        linkup("l-3", "Street food crawl", "u-1", "Amara Okafor", "Food")
            .location("Lagos")
            .starts_at(at(2024, 5, 18, 17))
            .created_at(at(2024, 5, 2, 8))
            .attendees(15)
            .capacity(15)
            .price(12.5)
            .status(LinkupStatus::Happened)
            .build(),
        linkup("l-4", "Sketching at the museum", "u-3", "Émilie Laurent", "Art")
            .location("Lyon")
            .starts_at(at(2024, 6, 15, 14))
            .created_at(at(2024, 5, 25, 16))
            .attendees(4)
            .capacity(10)
            .build(),
        linkup("l-5", "Tapas and flamenco", "u-4", "Diego Ramírez", "Food")
            .location("Madrid")
            .starts_at(at(2024, 5, 25, 20))
            .created_at(at(2024, 5, 1, 10))
            .attendees(3)
            .capacity(12)
            .price(25.0)
            .status(LinkupStatus::Cancelled)
            .build(),
        linkup("l-6", "Coastal cycling tour", "u-6", "Liam O'Brien", "Sports")
            .location("Dublin")
            .starts_at(at(2024, 6, 22, 9))
            .created_at(at(2024, 5, 28, 21))
            .attendees(6)
            .capacity(15)
            .price(10.0)
            .build(),
        linkup("l-7", "Language exchange", "u-1", "Amara Okafor", "Social")
            .location("Lagos")
            .starts_at(at(2024, 5, 11, 18))
            .created_at(at(2024, 4, 28, 13))
            .attendees(22)
            .capacity(30)
            .status(LinkupStatus::Happened)
            .build(),
        linkup("l-8", "Rooftop jazz evening", "u-2", "Jonas Weber", "Music")
            .location("Berlin")
            .starts_at(at(2024, 6, 29, 20))
            .created_at(at(2024, 5, 30, 11))
            .attendees(0)
            .capacity(40)
            .price(18.0)
            .build(),
    ]
}

pub fn reports() -> Vec<Report> {
    vec![
        Report::builder()
            .id("r-1")
            .target(ReportTarget::User)
            .target_id("u-8")
            .target_name("Mateo Rossi")
            .reporter_name("Jonas Weber")
            .reason("Spam")
            .details("Sent the same invitation to everyone in my friends list.")
            .created_at(at(2024, 3, 1, 18))
            .read(ReadState::Read)
            .build(),
        Report::builder()
            .id("r-2")
            .target(ReportTarget::User)
            .target_id("u-7")
            .target_name("Noor Haddad")
            .reporter_name("Amara Okafor")
            .reason("No-show")
            .created_at(at(2024, 4, 1, 9))
            .build(),
        Report::builder()
            .id("r-3")
            .target(ReportTarget::Linkup)
            .target_id("l-5")
            .target_name("Tapas and flamenco")
            .reporter_name("Sakura Ito")
            .reason("Cancelled without refund")
            .details("Paid for a ticket two weeks ahead.")
            .created_at(at(2024, 5, 26, 10))
            .build(),
        Report::builder()
            .id("r-4")
            .target(ReportTarget::Linkup)
            .target_id("l-2")
            .target_name("Board game night")
            .reporter_name("Liam O'Brien")
            .reason("Misleading description")
            .created_at(at(2024, 5, 31, 23))
            .build(),
        Report::builder()
            .id("r-5")
            .target(ReportTarget::User)
            .target_id("u-4")
            .target_name("Diego Ramírez")
            .reporter_name("Kwame Mensah")
            .reason("Harassment")
            .details("Rude messages after I declined to join.")
            .created_at(at(2024, 5, 27, 15))
            .build(),
    ]
}

pub fn verifications() -> Vec<Verification> {
    vec![
        Verification::builder()
            .id("v-1")
            .user_id("u-1")
            .user_name("Amara Okafor")
            .document("Passport")
            .submitted_at(at(2023, 2, 20, 11))
            .reviewed_at(at(2023, 2, 21, 9))
            .reviewer("Linkup Admin".to_owned())
            .status(VerificationStatus::Approved)
            .build(),
        Verification::builder()
            .id("v-2")
            .user_id("u-2")
            .user_name("Jonas Weber")
            .document("National ID")
            .submitted_at(at(2024, 5, 29, 14))
            .build(),
        Verification::builder()
            .id("v-3")
            .user_id("u-3")
            .user_name("Émilie Laurent")
            .document("Driver's license")
            .submitted_at(at(2023, 7, 1, 10))
            .reviewed_at(at(2023, 7, 2, 16))
            .reviewer("Linkup Admin".to_owned())
            .status(VerificationStatus::Approved)
            .build(),
        Verification::builder()
            .id("v-4")
            .user_id("u-5")
            .user_name("Sakura Ito")
            .document("Passport")
            .submitted_at(at(2024, 5, 10, 8))
            .reviewed_at(at(2024, 5, 11, 12))
            .reviewer("Linkup Admin".to_owned())
            .note("Photo does not match the document".to_owned())
            .status(VerificationStatus::Denied)
            .build(),
        Verification::builder()
            .id("v-5")
            .user_id("u-10")
            .user_name("Kwame Mensah")
            .document("National ID")
            .submitted_at(at(2024, 5, 30, 9))
            .build(),
    ]
}

pub fn feedback() -> Vec<Feedback> {
    let item = |id: &str, user: &str, category: &str, platform: &str, rating: u8| {
        Feedback::builder()
            .id(id)
            .user_name(user)
            .category(category)
            .platform(platform)
            .rating(rating)
    };

    vec![
        item("f-1", "Amara Okafor", "Feature request", "iOS", 4)
            .message("Let me pin my favourite linkups.")
            .submitted_at(at(2024, 5, 2, 12))
            .read(ReadState::Read)
            .build(),
        item("f-2", "Jonas Weber", "Bug", "Android", 2)
            .message("The map does not load on my tablet.")
            .submitted_at(at(2024, 5, 14, 18))
            .build(),
        item("f-3", "Sakura Ito", "Praise", "Web", 5)
            .message("Met great people at the sketching meetup!")
            .submitted_at(at(2024, 5, 20, 9))
            .build(),
        item("f-4", "Liam O'Brien", "Bug", "iOS", 3)
            .message("Notifications arrive twice.")
            .submitted_at(at(2024, 5, 29, 7))
            .build(),
        item("f-5", "Kwame Mensah", "Feature request", "Android", 4)
            .message("Group chats for each linkup would help.")
            .submitted_at(at(2024, 5, 31, 20))
            .build(),
    ]
}

pub fn staff() -> Vec<StaffMember> {
    vec![
        StaffMember::builder()
            .id("staff-1")
            .name("Linkup Admin")
            .email("admin@linkup.com")
            .role(StaffRole::Admin)
            .added_at(at(2023, 1, 1, 9))
            .build(),
        StaffMember::builder()
            .id("staff-2")
            .name("Priya Nair")
            .email("priya@linkup.com")
            .role(StaffRole::Moderator)
            .added_at(at(2023, 5, 15, 10))
            .build(),
        StaffMember::builder()
            .id("staff-3")
            .name("Tom Becker")
            .email("tom@linkup.com")
            .role(StaffRole::Support)
            .added_at(at(2024, 2, 1, 9))
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::query::Record;

    fn unique<R: Record>(records: &[R]) -> bool {
        let ids: HashSet<_> = records.iter().map(R::id).collect();
        ids.len() == records.len()
    }

    #[test]
    fn ids_are_unique() {
        assert!(unique(&users()));
        assert!(unique(&linkups()));
        assert!(unique(&reports()));
        assert!(unique(&verifications()));
        assert!(unique(&feedback()));
        assert!(unique(&staff()));
    }

    #[test]
    fn friendship_is_mutual() {
        let users = users();
        for user in &users {
            for friend in &user.friend_ids {
                let other = users.iter().find(|u| u.id == *friend).unwrap();
                assert!(other.is_friend_of(&user.id), "{} <-> {}", user.id, friend);
            }
        }
    }

    #[test]
    fn references_point_at_existing_records() {
        let users = users();
        let user_ids: HashSet<_> = users.iter().map(|u| u.id).collect();
        let linkup_ids: HashSet<_> = linkups().iter().map(|l| l.id).collect();

        assert!(verifications().iter().all(|v| user_ids.contains(&v.user_id)));
        assert!(linkups().iter().all(|l| user_ids.contains(&l.creator_id)));
        for report in reports() {
            let known = match report.target {
                ReportTarget::User => user_ids.contains(&report.target_id),
                ReportTarget::Linkup => linkup_ids.contains(&report.target_id),
            };
            assert!(known, "{}", report.id);
        }
    }

    #[test]
    fn verified_flag_matches_approvals() {
        let users = users();
        for verification in verifications() {
            let user = users.iter().find(|u| u.id == verification.user_id).unwrap();
            assert_eq!(
                user.verified,
                verification.status == VerificationStatus::Approved,
                "{}",
                user.id
            );
        }
    }

    #[test]
    fn created_counts_match_linkups() {
        let linkups = linkups();
        for user in users() {
            let created = linkups.iter().filter(|l| l.creator_id == user.id).count();
            assert_eq!(user.linkups_created as usize, created, "{}", user.id);
        }
    }
}
