//! The four civic issues and their actors.

use civicsim_domain::{
    ActorProfile, Citizen, Councilor, DomainError, GroundPoint, Issue, IssueRegistry, Zone,
};

fn citizen(id: &str, name: &str, role: &str, x: f32, z: f32, persona: &str, request: &str) -> Citizen {
    Citizen::new(
        ActorProfile::new(id, name, role, GroundPoint::new(x, z))
            .with_persona(persona)
            .with_initial_request(request),
    )
}

fn councilor(id: &str, name: &str, x: f32, z: f32, persona: &str, request: &str) -> Councilor {
    Councilor::new(
        ActorProfile::new(id, name, "City councilor", GroundPoint::new(x, z))
            .with_persona(persona)
            .with_initial_request(request),
    )
}

/// Issues in declaration order: scooter, pet, youth, trash.
pub fn city_issues() -> Result<IssueRegistry, DomainError> {
    IssueRegistry::new(vec![scooter()?, pet()?, youth()?, trash()?])
}

fn scooter() -> Result<Issue, DomainError> {
    Issue::new(
        "scooter",
        Zone::North,
        "Shared E-Scooter Conflict (North)",
        councilor(
            "councilor_scooter",
            "Kim Jeongchaek",
            0.0,
            -35.0,
            "You are Councilor Kim Jeongchaek of Evergreen City. You receive many complaints about shared e-scooters and are looking for a balanced solution that satisfies every stakeholder. Encourage the student to submit an ordinance. Stay professional and neutral.",
            "Citizens are divided over shared e-scooters. We need a wise solution.",
        ),
        vec![
            citizen(
                "parent",
                "Kim Minjun",
                "Parent of a grade-schooler",
                -15.0,
                -45.0,
                "You are Kim Minjun, a parent of a grade-schooler. Scooters racing down sidewalks and alleys make you fear for your child's safety. You want strict regulation and penalties. Speak anxiously and firmly.",
                "The streets are too dangerous for kids! Please do something about these scooters.",
            ),
            citizen(
                "student",
                "Park Seoyeon",
                "University student rider",
                15.0,
                -45.0,
                "You are Park Seoyeon, a university student who rides shared scooters to class. They are cheap and convenient, and heavy regulation would take away your freedom to get around. Argue for rider-friendly measures, sounding a little wronged and frustrated.",
                "Scooters are convenient transport. If you just ban them, what are we supposed to do?",
            ),
            citizen(
                "owner",
                "Choi Youngsoo",
                "Shop owner",
                -10.0,
                -25.0,
                "You are Choi Youngsoo, who runs a small shop. Scooters dumped at your entrance hurt your business. You want illegally parked scooters towed or fined. Complain with some irritation.",
                "Scooters left anywhere in front of my shop are killing my business!",
            ),
            citizen(
                "disabled",
                "Lee Jihye",
                "Wheelchair user",
                10.0,
                -25.0,
                "You are Lee Jihye, a wheelchair user. Guaranteed freedom of movement comes first.",
                "A scooter blocking the sidewalk is a wall to us. Please protect our right to get around.",
            ),
        ],
    )
}

fn pet() -> Result<Issue, DomainError> {
    Issue::new(
        "pet",
        Zone::East,
        "Pet Park Conflict (East)",
        councilor(
            "councilor_pet",
            "Lee Minwon",
            35.0,
            0.0,
            "You are Councilor Lee Minwon. The pet park dispute has residents at odds and you are searching for a solution that works for pet owners and non-owners alike. Be careful and empathetic.",
            "How can we settle the pet park issue so that everyone is satisfied?",
        ),
        vec![
            citizen(
                "pet_owner",
                "Kang Dasom",
                "Dog owner",
                45.0,
                -5.0,
                "You are sad there is no place where your dog can run freely.",
                "Please build a pet park where my dog can run around freely.",
            ),
            citizen(
                "resident",
                "Yoon Jeongho",
                "Neighbor",
                45.0,
                5.0,
                "Barking and dog waste stress you out.",
                "The park is full of barking and dog waste. Give us back a quiet park.",
            ),
            citizen(
                "non_pet_owner",
                "Han Sora",
                "Parent without pets",
                25.0,
                -10.0,
                "Your children's safety comes first.",
                "Off-leash dogs frighten the children. We urgently need safety measures.",
            ),
            citizen(
                "vet",
                "Dr. Park",
                "Veterinarian",
                25.0,
                10.0,
                "You believe owners need education and people and pets need separate spaces.",
                "We need rules and spaces where pets and people can both be happy.",
            ),
        ],
    )
}

fn youth() -> Result<Issue, DomainError> {
    Issue::new(
        "youth",
        Zone::South,
        "Lack of Youth Spaces (South)",
        councilor(
            "councilor_youth",
            "Park Mirae",
            0.0,
            35.0,
            "You want to hear what young people have to say.",
            "How should we create spaces for the young people who are our city's future?",
        ),
        vec![
            citizen(
                "teenager",
                "Lee Haneul",
                "High school student",
                -15.0,
                45.0,
                "You need a space where you can hang out freely.",
                "I wish we had a place of our own where we could relax with friends.",
            ),
            citizen(
                "police",
                "Officer Na",
                "Patrol officer",
                15.0,
                45.0,
                "A wholesome space would help prevent trouble.",
                "Teens with nowhere to go end up wandering the streets and getting exposed to crime. We need a plan.",
            ),
            citizen(
                "elder",
                "Mr. Jang",
                "Neighborhood elder",
                -10.0,
                25.0,
                "You worry about students making noise late at night.",
                "Students are loud and smoking late at night. Maybe it's because they have nowhere to rest...",
            ),
            citizen(
                "pc_owner",
                "Oh Sungmin",
                "PC cafe owner",
                10.0,
                25.0,
                "Wholesome places to have fun are good for the neighborhood.",
                "Kids these days have nowhere to go but PC cafes. The city should build a wholesome place for them.",
            ),
        ],
    )
}

fn trash() -> Result<Issue, DomainError> {
    Issue::new(
        "trash",
        Zone::West,
        "Illegal Dumping (West)",
        councilor(
            "councilor_trash",
            "Choi Hwangyeong",
            -35.0,
            0.0,
            "You believe strict enforcement and better awareness are both needed.",
            "Is there a good way to stop illegal dumping and keep our city clean?",
        ),
        vec![
            citizen(
                "cleaner",
                "Seo Gilsu",
                "Sanitation worker",
                -45.0,
                -5.0,
                "Unsorted garbage is a serious problem.",
                "Unsorted trash has made my job several times harder. We need a way to stop illegal dumping.",
            ),
            citizen(
                "villa_resident",
                "Moon Yuna",
                "Apartment resident",
                -45.0,
                5.0,
                "Residents need help paying for official garbage bags.",
                "Official garbage bags are so expensive that people keep sneaking their trash out.",
            ),
            citizen(
                "restaurant_owner",
                "Bae Jaewon",
                "Restaurant owner",
                -25.0,
                -10.0,
                "You want support for installing CCTV.",
                "Someone keeps dumping trash in front of my restaurant. I might have to put up CCTV.",
            ),
            citizen(
                "office_worker",
                "Jung Minho",
                "Office worker living alone",
                -25.0,
                10.0,
                "You need an always-available collection system.",
                "Trash pickup days and hours are fixed, so busy office workers can hardly keep up.",
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::city::city_geometry;

    #[test]
    fn four_issues_one_per_zone() {
        let registry = city_issues().unwrap();
        let keys: Vec<_> = registry.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["scooter", "pet", "youth", "trash"]);
        for zone in Zone::all() {
            assert!(registry.by_zone(*zone).is_some());
        }
    }

    #[test]
    fn every_actor_stands_in_its_issue_zone_and_clear_of_obstacles() {
        let registry = city_issues().unwrap();
        let geometry = city_geometry();
        for (issue, actor) in registry.actors() {
            assert_eq!(actor.zone(), Some(issue.zone()), "{}", actor.id());
            assert!(!geometry.is_blocked(actor.position()), "{}", actor.id());
            assert!(!actor.profile().initial_request.is_empty());
        }
    }
}
